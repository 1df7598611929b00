//! Neuron slot layout within one layer, including collapsing of large layers.

use super::types::{NeuronSlot, SlotSource};
use crate::config::CollapseConfig;

/// Compute the slots of a layer of `size` neurons, top to bottom.
///
/// A collapsed layer keeps `collapse_start` leading and `collapse_end`
/// trailing neurons around a single placeholder. Slot `k` of `n` sits at
/// `(n - 1) / 2 - k`, so the layer is centred on 0.
pub fn layout_slots(
    size: usize,
    collapse: &CollapseConfig,
    numbering_reversed: bool,
) -> Vec<NeuronSlot> {
    let sources: Vec<SlotSource> = if collapse.collapses(size) {
        let tail = size - collapse.collapse_end;
        tracing::trace!(size, shown = collapse.shown(), "collapsing layer");
        (0..collapse.collapse_start)
            .map(|index| SlotSource::Neuron { index })
            .chain(std::iter::once(SlotSource::Collapsed {
                first: collapse.collapse_start,
                last: tail - 1,
            }))
            .chain((tail..size).map(|index| SlotSource::Neuron { index }))
            .collect()
    } else {
        (0..size).map(|index| SlotSource::Neuron { index }).collect()
    };

    let top = (sources.len() as f64 - 1.0) / 2.0;
    sources
        .into_iter()
        .enumerate()
        .map(|(k, source)| NeuronSlot {
            position: top - k as f64,
            source,
            display_index: match source {
                SlotSource::Neuron { index } => {
                    Some(display_index(index, size, numbering_reversed))
                }
                SlotSource::Collapsed { .. } => None,
            },
        })
        .collect()
}

/// Numbering shown for neuron `index`: top-to-bottom when reversed,
/// bottom-to-top otherwise.
pub fn display_index(index: usize, size: usize, numbering_reversed: bool) -> usize {
    if numbering_reversed {
        index
    } else {
        size - 1 - index
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_neurons.rs"]
mod tests;
