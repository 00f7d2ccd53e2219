use super::{IntoValue, Value};
use indexmap::IndexMap;

/// An insertion-ordered set of keyword arguments.
///
/// Inserting an existing key replaces its value but keeps the key at its original position, so
/// a call site that repeats a key ends up with the last value written.
///
/// Two sets are equal when they hold the same keys with equal values, regardless of order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeywordArguments {
    entries: IndexMap<String, Value>,
}

/// Builds [`KeywordArguments`] from `key => value` pairs, in call-site order.
///
/// ```rust
/// use dynbridge_core::{Value, kwargs};
///
/// let arguments = kwargs! { "string" => "42", "int" => 42 };
///
/// assert_eq!(arguments.get("int"), Some(&Value::Int(42)));
/// ```
#[macro_export]
macro_rules! kwargs {
    () => {
        $crate::value::KeywordArguments::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut arguments = $crate::value::KeywordArguments::new();
        $(arguments.insert($key, $value);)+
        arguments
    }};
}

impl KeywordArguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a keyword argument, returning the value it replaced, if any.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<Value>
    where
        K: Into<String>,
        V: IntoValue,
    {
        self.entries.insert(key.into(), value.into_value())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for KeywordArguments
where
    K: Into<String>,
    V: IntoValue,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into_value()))
            .collect();
        Self { entries }
    }
}

impl IntoIterator for KeywordArguments {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_call_site_order() {
        let arguments = kwargs! { "string" => "42", "int" => 42, "flag" => true };

        assert_eq!(
            arguments.keys().collect::<Vec<_>>(),
            vec!["string", "int", "flag"]
        );
    }

    #[test]
    fn duplicate_keys_keep_the_last_value_at_the_first_position() {
        let arguments: KeywordArguments = [("a", 1), ("b", 2), ("a", 3)].into_iter().collect();

        assert_eq!(arguments.len(), 2);
        assert_eq!(arguments.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(arguments.get("a"), Some(&Value::Int(3)));
    }

    #[test]
    fn equality_ignores_order() {
        let forward: KeywordArguments = (0..1_000).map(|i| (format!("k{i}"), i)).collect();
        let backward: KeywordArguments = (0..1_000).rev().map(|i| (format!("k{i}"), i)).collect();

        assert_eq!(forward, backward);
        assert_eq!(forward.keys().next(), Some("k0"));
        assert_eq!(backward.keys().next(), Some("k999"));
        assert_ne!(forward, kwargs! { "k0" => 0 });
    }

    #[test]
    fn null_values_are_kept() {
        let arguments = kwargs! { "missing" => Value::Null };

        assert!(arguments.contains_key("missing"));
        assert_eq!(arguments.get("missing"), Some(&Value::Null));
    }
}
