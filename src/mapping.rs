//! Action mapping tables.
//!
//! A mapping table relates an adapter name to the actions it can drive and
//! the device key each action is bound to. The resolver holds two of these,
//! one for buttons and one for axes; both are built once at construction and
//! immutable afterwards.
//!
//! Tables are plain serde-able maps, so a host can describe its bindings in
//! a data file:
//!
//! ```json
//! {
//!     "keyboard": { "jump": "Space", "move": "Axis(KeyA, KeyD)" },
//!     "gamepad":  { "jump": 0 }
//! }
//! ```

use std::collections::HashMap;

use crate::adapter::DeviceKey;
use crate::error::InputError;

/// `adapter name → (action name → device key)`.
pub type ActionMapping = HashMap<String, HashMap<String, DeviceKey>>;

/// Looks up the device key bound to `action` for the adapter named `adapter`.
pub(crate) fn mapped_key<'a>(
    mapping: &'a ActionMapping,
    adapter: &str,
    action: &str,
) -> Option<&'a DeviceKey> {
    mapping.get(adapter).and_then(|actions| actions.get(action))
}

/// Fails fast when a table refers to an adapter that was never registered.
pub(crate) fn check_adapters_known(
    kind: &'static str,
    mapping: &ActionMapping,
    known: &[String],
) -> Result<(), InputError> {
    for adapter in mapping.keys() {
        if !known.iter().any(|name| name == adapter) {
            return Err(InputError::UnknownAdapter {
                mapping: kind,
                adapter: adapter.clone(),
            });
        }
    }

    Ok(())
}

/// Convenience for building a mapping table from literals.
///
/// ```
/// use stickshift::mapping::mapping;
///
/// let buttons = mapping([
///     ("keyboard", vec![("jump", "Space".into())]),
///     ("mouse", vec![("fire", 0.into())]),
/// ]);
/// assert_eq!(buttons.len(), 2);
/// ```
pub fn mapping<const N: usize>(
    entries: [(&str, Vec<(&str, DeviceKey)>); N],
) -> ActionMapping {
    entries
        .into_iter()
        .map(|(adapter, actions)| {
            (
                adapter.to_string(),
                actions
                    .into_iter()
                    .map(|(action, key)| (action.to_string(), key))
                    .collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_follows_adapter_then_action() {
        let table = mapping([("keyboard", vec![("jump", "Space".into())])]);

        assert_eq!(
            mapped_key(&table, "keyboard", "jump"),
            Some(&DeviceKey::Name("Space".into()))
        );
        assert_eq!(mapped_key(&table, "keyboard", "fire"), None);
        assert_eq!(mapped_key(&table, "mouse", "jump"), None);
    }

    #[test]
    fn unknown_adapter_is_rejected() {
        let table = mapping([("gamepad", vec![("jump", 0.into())])]);
        let known = vec!["keyboard".to_string()];

        let err = check_adapters_known("button", &table, &known).unwrap_err();
        assert!(matches!(
            err,
            InputError::UnknownAdapter { mapping: "button", adapter } if adapter == "gamepad"
        ));
    }

    #[test]
    fn mapping_table_deserializes_from_json() {
        let table: ActionMapping = serde_json::from_str(
            r#"{
                "keyboard": { "jump": "Space", "steer": "Axis(KeyA, KeyD)" },
                "gamepad": { "jump": 0 }
            }"#,
        )
        .unwrap();

        assert_eq!(
            mapped_key(&table, "keyboard", "steer"),
            Some(&DeviceKey::Name("Axis(KeyA, KeyD)".into()))
        );
        assert_eq!(mapped_key(&table, "gamepad", "jump"), Some(&DeviceKey::Index(0)));
    }
}
