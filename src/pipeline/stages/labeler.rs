use indexmap::IndexMap;

use crate::pipeline::types::{ElementKind, InteractiveElementRecord};

/// Human-readable names keyed by element index (`element_{i}`).
pub fn label_components(elements: &[InteractiveElementRecord]) -> IndexMap<String, String> {
    let mut buttons = 0;
    let mut inputs = 0;

    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            let label = match element.element_type {
                ElementKind::Button => {
                    buttons += 1;
                    format!("Button {buttons}")
                }
                ElementKind::Input => {
                    inputs += 1;
                    format!("Input Field {inputs}")
                }
                _ => format!("Container {}", index + 1),
            };
            (format!("element_{index}"), label)
        })
        .collect()
}
