//! Shared helpers for building configurations from explicit layers.

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::PullwireConfig;

/// Pushes `value` onto the composer as the named layer.
pub fn apply_layer(composer: &mut MergeComposer, layer: &str, value: Value) {
    match layer {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        "cli" => composer.push_cli(value),
        other => panic!("unknown layer type: {other}"),
    }
}

/// Merges `(layer, value)` pairs, lowest precedence first.
pub fn build_config_from_layers(layers: &[(&str, Value)]) -> PullwireConfig {
    let composer = layers
        .iter()
        .fold(MergeComposer::new(), |mut composer, (layer, value)| {
            apply_layer(&mut composer, layer, value.clone());
            composer
        });

    PullwireConfig::merge_from_layers(composer.layers()).expect("layers should merge")
}
