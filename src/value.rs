//! Runtime values carried through a template

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Property mapping handed to the element construction primitive
pub type Props<E> = BTreeMap<String, Value<E>>;

/// A callable value, compared by identity
pub struct Callback<E>(Rc<dyn Fn(&[Value<E>]) -> Value<E>>);

impl<E> Callback<E> {
    pub fn new(f: impl Fn(&[Value<E>]) -> Value<E> + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, args: &[Value<E>]) -> Value<E> {
        (self.0)(args)
    }

    /// Whether both handles point at the same closure
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<E> Clone for Callback<E> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<E> PartialEq for Callback<E> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<E> fmt::Debug for Callback<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Rc::as_ptr(&self.0))
    }
}

/// A value interpolated into a template, or produced by rendering one
#[derive(Debug, Clone, PartialEq)]
pub enum Value<E> {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Callback(Callback<E>),
    /// Opaque value built by the host
    Element(E),
    /// Sequences and pre-rendered sub-trees
    List(Vec<Value<E>>),
}

impl<E> Value<E> {
    pub fn element(element: E) -> Self {
        Value::Element(element)
    }

    pub fn callback(f: impl Fn(&[Value<E>]) -> Value<E> + 'static) -> Self {
        Value::Callback(Callback::new(f))
    }

    /// Host truthiness: null, false, zero, NaN and the empty string are falsy
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Text(s) => !s.is_empty(),
            Value::Callback(_) | Value::Element(_) | Value::List(_) => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_element(&self) -> Option<&E> {
        match self {
            Value::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_callback(&self) -> Option<&Callback<E>> {
        match self {
            Value::Callback(c) => Some(c),
            _ => None,
        }
    }
}

impl<E> fmt::Display for Value<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write_number(f, *n),
            Value::Text(s) => f.write_str(s),
            Value::Callback(_) => f.write_str("[callback]"),
            Value::Element(_) => f.write_str("[element]"),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        // -0 prints as 0
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{}", n)
    }
}

impl<E> From<&str> for Value<E> {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl<E> From<String> for Value<E> {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<E> From<bool> for Value<E> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<E> From<f64> for Value<E> {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl<E> From<i32> for Value<E> {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl<E> From<Vec<Value<E>>> for Value<E> {
    fn from(items: Vec<Value<E>>) -> Self {
        Value::List(items)
    }
}

impl<E, T: Into<Value<E>>> From<Option<T>> for Value<E> {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

/// First argument of the element construction primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Identity<C> {
    /// Built-in element name
    Tag(String),
    /// Constructor resolved from a name table
    Component(C),
}

impl<C> Identity<C> {
    pub fn as_tag(&self) -> Option<&str> {
        match self {
            Identity::Tag(t) => Some(t),
            Identity::Component(_) => None,
        }
    }
}
