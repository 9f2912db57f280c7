/*!
Structural checks for replies of the address validation service.

The service is untrusted: every field the engine later dereferences is checked here, and a
reply with any violation is rejected as a whole.
*/
use serde_json::{Map, Value};
use std::fmt;

/// What is wrong at a given path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// The key is absent.
    Missing,
    /// The key is present but `null`.
    Null,
    /// The value has another JSON type.
    WrongType { expected: &'static str },
    /// Passed the structural checks but still failed to decode.
    Undecodable(String),
}

/// A single structural problem in a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted path, e.g. `result.address.addressComponents[1].componentType`.
    pub path: String,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let path = if self.path.is_empty() {
            "<root>"
        } else {
            self.path.as_str()
        };
        match self.kind {
            ViolationKind::Missing => write!(f, "{}: missing", path),
            ViolationKind::Null => write!(f, "{}: null", path),
            ViolationKind::WrongType { expected } => write!(f, "{}: expected {}", path, expected),
            ViolationKind::Undecodable(ref err) => write!(f, "{}: {}", path, err),
        }
    }
}

/// Returns `true` when `value` has the shape of a processable response.
///
/// Never panics, whatever the input.
pub fn is_processable_response(value: &Value) -> bool {
    check(value).is_ok()
}

/// Checks `value` and reports every violation found.
///
/// Children of a missing or mistyped value are not visited.
pub fn check(value: &Value) -> Result<(), Vec<Violation>> {
    let mut checker = Checker::default();
    checker.response(value);
    if checker.violations.is_empty() {
        Ok(())
    } else {
        Err(checker.violations)
    }
}

#[derive(Default)]
struct Checker {
    violations: Vec<Violation>,
}

impl Checker {
    fn response(&mut self, value: &Value) {
        let root = match value.as_object() {
            Some(root) => root,
            None => {
                self.report("", ViolationKind::WrongType { expected: "object" });
                return;
            }
        };

        let result = match self.object(root, "", "result") {
            Some(result) => result,
            None => return,
        };

        if let Some(verdict) = self.object(result, "result", "verdict") {
            self.optional_bool(
                verdict,
                "result.verdict",
                "hasUnconfirmedComponents",
            );
        }

        if let Some(address) = self.object(result, "result", "address") {
            self.address(address);
        }
    }

    fn address(&mut self, address: &Map<String, Value>) {
        const PATH: &str = "result.address";

        if let Some(postal_address) = self.object(address, PATH, "postalAddress") {
            const POSTAL: &str = "result.address.postalAddress";
            self.string(postal_address, POSTAL, "postalCode");
            self.string(postal_address, POSTAL, "administrativeArea");
            self.string(postal_address, POSTAL, "locality");
            self.string_array(postal_address, POSTAL, "addressLines");
        }

        if let Some(components) = self.array(address, PATH, "addressComponents") {
            for (i, component) in components.iter().enumerate() {
                let path = format!("{}.addressComponents[{}]", PATH, i);
                self.component(component, &path);
            }
        }

        // Absent means nothing is missing, but a present key must hold strings.
        if address.contains_key("missingComponentTypes") {
            self.string_array(address, PATH, "missingComponentTypes");
        }
    }

    fn component(&mut self, component: &Value, path: &str) {
        let component = match component.as_object() {
            Some(component) => component,
            None => {
                self.report(path, ViolationKind::WrongType { expected: "object" });
                return;
            }
        };

        if let Some(name) = self.object(component, path, "componentName") {
            self.string(name, &format!("{}.componentName", path), "text");
        }
        self.string(component, path, "componentType");
        self.string(component, path, "confirmationLevel");
    }

    fn field<'a>(
        &mut self,
        parent: &'a Map<String, Value>,
        path: &str,
        key: &str,
    ) -> Option<&'a Value> {
        match parent.get(key) {
            None => {
                self.report(&join(path, key), ViolationKind::Missing);
                None
            }
            Some(Value::Null) => {
                self.report(&join(path, key), ViolationKind::Null);
                None
            }
            Some(value) => Some(value),
        }
    }

    fn object<'a>(
        &mut self,
        parent: &'a Map<String, Value>,
        path: &str,
        key: &str,
    ) -> Option<&'a Map<String, Value>> {
        let value = self.field(parent, path, key)?;
        let object = value.as_object();
        if object.is_none() {
            self.report(&join(path, key), ViolationKind::WrongType { expected: "object" });
        }
        object
    }

    fn array<'a>(
        &mut self,
        parent: &'a Map<String, Value>,
        path: &str,
        key: &str,
    ) -> Option<&'a Vec<Value>> {
        let value = self.field(parent, path, key)?;
        let array = value.as_array();
        if array.is_none() {
            self.report(&join(path, key), ViolationKind::WrongType { expected: "array" });
        }
        array
    }

    fn string(&mut self, parent: &Map<String, Value>, path: &str, key: &str) {
        if let Some(value) = self.field(parent, path, key) {
            if !value.is_string() {
                self.report(&join(path, key), ViolationKind::WrongType { expected: "string" });
            }
        }
    }

    fn string_array(&mut self, parent: &Map<String, Value>, path: &str, key: &str) {
        if let Some(items) = self.array(parent, path, key) {
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    self.report(
                        &format!("{}[{}]", join(path, key), i),
                        ViolationKind::WrongType { expected: "string" },
                    );
                }
            }
        }
    }

    fn optional_bool(&mut self, parent: &Map<String, Value>, path: &str, key: &str) {
        match parent.get(key) {
            None | Some(Value::Null) | Some(Value::Bool(_)) => {}
            Some(_) => self.report(&join(path, key), ViolationKind::WrongType { expected: "boolean" }),
        }
    }

    fn report(&mut self, path: &str, kind: ViolationKind) {
        self.violations.push(Violation {
            path: path.to_string(),
            kind,
        });
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}
