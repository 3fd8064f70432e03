//! Layered configuration merging.
//!
//! The user-global file is the base and the project-local file overlays it.
//!
//! # Merge Rules
//!
//! - Mappings are merged recursively
//! - Sequences are replaced entirely (an overlay's `advisory_packages` is
//!   the complete list, not an addition)
//! - Null values in the overlay delete the key, restoring the built-in default
//! - Scalars in the overlay replace scalars in the base

use serde_yaml::Value;

/// Deep merge `overlay` onto `base`.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut merged = base_map.clone();
            for (key, value) in overlay_map {
                if value.is_null() {
                    merged.remove(key);
                    continue;
                }
                let next = match base_map.get(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), next);
            }
            Value::Mapping(merged)
        }
        // An empty file parses to Null; it changes nothing.
        (base, Value::Null) => base.clone(),
        (_, overlay) => overlay.clone(),
    }
}

/// Merge layers in order (later layers take precedence).
pub fn merge_configs(layers: &[Value]) -> Value {
    layers
        .iter()
        .fold(Value::Mapping(Default::default()), |acc, layer| {
            deep_merge(&acc, layer)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn nested_settings_merge_recursively() {
        let base = yaml(
            r#"
dependency:
  executable: msms
  conda:
    channel: bioconda
    package: msms
"#,
        );
        let overlay = yaml(
            r#"
dependency:
  conda:
    channel: conda-forge
"#,
        );

        let result = deep_merge(&base, &overlay);

        assert_eq!(result["dependency"]["conda"]["channel"], "conda-forge");
        assert_eq!(result["dependency"]["conda"]["package"], "msms");
        assert_eq!(result["dependency"]["executable"], "msms");
    }

    #[test]
    fn advisory_lists_are_replaced_not_merged() {
        let base = yaml("advisory_packages: [numpy, scipy]");
        let overlay = yaml("advisory_packages: [trimesh]");

        let result = deep_merge(&base, &overlay);
        let list = result["advisory_packages"].as_sequence().unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list[0], "trimesh");
    }

    #[test]
    fn null_removes_inherited_value() {
        let base = yaml("python: /opt/conda/bin/python\ndisplay_name: PyVOL");
        let overlay = yaml("python: null");

        let result = deep_merge(&base, &overlay);

        assert!(result.get("python").is_none());
        assert_eq!(result["display_name"], "PyVOL");
    }

    #[test]
    fn empty_file_leaves_base_unchanged() {
        let base = yaml("display_name: PyVOL");
        let result = deep_merge(&base, &Value::Null);
        assert_eq!(result, base);
    }

    #[test]
    fn merge_configs_applies_layers_in_order() {
        let layers = vec![yaml("a: 1\nb: 2"), yaml("b: 3\nc: 4"), yaml("c: 5")];

        let result = merge_configs(&layers);

        assert_eq!(result["a"], 1);
        assert_eq!(result["b"], 3);
        assert_eq!(result["c"], 5);
    }

    #[test]
    fn merge_of_nothing_is_empty_mapping() {
        let result = merge_configs(&[]);
        assert!(result.as_mapping().unwrap().is_empty());
    }
}
