// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reflect `disabled` and tab order configuration onto the bound element.
//!
//! | configuration           | `disabled` | `tabindex`          |
//! |-------------------------|------------|---------------------|
//! | disabled                | present    | absent              |
//! | enabled + focusable     | absent     | configured value    |
//! | enabled + not focusable | absent     | absent              |
//!
//! Writes are skipped when the element already has the wanted value, so
//! synchronizing twice with the same configuration mutates nothing the second
//! time.

use crate::config::TapConfig;
use crate::element::{Attribute, ElementHandle};

/// Brings the element's attributes in line with `config`.
///
/// Returns the number of attribute writes/removals performed. Does nothing
/// when `config.should_reflect_attributes` is `false`.
pub fn sync_attributes<N, H>(config: &TapConfig<N>, handle: &mut H) -> usize
where
    H: ElementHandle + ?Sized,
{
    if !config.should_reflect_attributes {
        return 0;
    }

    let disabled = config.is_disabled.then_some("disabled");
    let tab_index = (config.is_focusable && !config.is_disabled)
        .then(|| config.tab_index.to_attribute());

    let mut writes = 0;
    writes += reflect(handle, Attribute::Disabled, disabled);
    writes += reflect(handle, Attribute::TabIndex, tab_index.as_deref());
    if writes > 0 {
        log::trace!(
            "reflected attributes on {:?}: disabled={:?} tabindex={:?}",
            handle.node(),
            disabled,
            tab_index
        );
    }
    writes
}

fn reflect<H: ElementHandle + ?Sized>(
    handle: &mut H,
    attribute: Attribute,
    wanted: Option<&str>,
) -> usize {
    let current = handle.attribute(attribute);
    if current.as_deref() == wanted {
        return 0;
    }
    match wanted {
        Some(value) => handle.set_attribute(attribute, value),
        None => handle.remove_attribute(attribute),
    }
    1
}
