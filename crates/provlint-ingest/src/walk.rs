// SPDX-License-Identifier: Apache-2.0

use serde_json::Value;

/// One item of a depth-first walk: either a mapping key or a scalar leaf.
///
/// Keys are yielded as candidate scalars in their own right, since
/// provenance fields are sometimes key names rather than values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node<'a> {
    Key(&'a str),
    Scalar(&'a Value),
}

enum Task<'a> {
    Visit(&'a Value),
    EmitKey(&'a str),
}

/// Lazy depth-first iterator over every mapping key and scalar leaf of a
/// document, in encounter order. Keys are interleaved before their
/// subtree's leaves. Pure; the document is never mutated. JSON trees are
/// acyclic, so no cycle guard is needed.
pub struct Walk<'a> {
    stack: Vec<Task<'a>>,
}

#[must_use]
pub fn walk(value: &Value) -> Walk<'_> {
    Walk {
        stack: vec![Task::Visit(value)],
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(task) = self.stack.pop() {
            match task {
                Task::EmitKey(key) => return Some(Node::Key(key)),
                Task::Visit(value) => match value {
                    Value::Object(map) => {
                        // reversed so the first entry is on top of the stack
                        for (key, child) in map.iter().rev() {
                            self.stack.push(Task::Visit(child));
                            self.stack.push(Task::EmitKey(key.as_str()));
                        }
                    }
                    Value::Array(items) => {
                        for item in items.iter().rev() {
                            self.stack.push(Task::Visit(item));
                        }
                    }
                    scalar => return Some(Node::Scalar(scalar)),
                },
            }
        }
        None
    }
}

/// The walk's string and number content joined with newlines, for the
/// free-text recognizer fallback. Numbers are coerced to their JSON
/// rendering; booleans and nulls are not candidate text.
#[must_use]
pub fn scalar_text(value: &Value) -> String {
    let mut parts: Vec<String> = Vec::new();
    for node in walk(value) {
        match node {
            Node::Key(key) => parts.push(key.to_string()),
            Node::Scalar(Value::String(s)) => parts.push(s.clone()),
            Node::Scalar(Value::Number(n)) => parts.push(n.to_string()),
            Node::Scalar(_) => {}
        }
    }
    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::{scalar_text, walk, Node};
    use serde_json::{json, Value};

    fn rendered(value: &Value) -> Vec<String> {
        walk(value)
            .map(|node| match node {
                Node::Key(k) => format!("key:{k}"),
                Node::Scalar(v) => format!("leaf:{v}"),
            })
            .collect()
    }

    #[test]
    fn walk_yields_keys_before_their_subtrees_in_encounter_order() {
        let doc = json!({
            "outer": {"inner": 1},
            "list": ["a", 2],
        });
        assert_eq!(
            rendered(&doc),
            vec![
                "key:outer",
                "key:inner",
                "leaf:1",
                "key:list",
                "leaf:\"a\"",
                "leaf:2",
            ]
        );
    }

    #[test]
    fn walk_yields_each_leaf_exactly_once() {
        let doc = json!({"a": [1, [2, 3]], "b": {"c": null, "d": true}});
        let leaves = walk(&doc)
            .filter(|n| matches!(n, Node::Scalar(_)))
            .count();
        assert_eq!(leaves, 5);
    }

    #[test]
    fn scalar_text_includes_keys_strings_and_numbers_only() {
        let doc = json!({"job": "d0abc", "count": 7, "flag": true, "none": null});
        let text = scalar_text(&doc);
        assert_eq!(text, "job\nd0abc\ncount\n7\nflag\nnone");
    }

    #[test]
    fn scalar_root_is_its_own_leaf() {
        let doc = json!("solo");
        assert_eq!(rendered(&doc), vec!["leaf:\"solo\""]);
    }
}
