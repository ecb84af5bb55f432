//! Popover editors: the per-item field editor, the rename box and the quick
//! toolbar. All of them turn typed text into an `ItemPatch`.

use std::fmt;

use glam::{DVec2, dvec2};

use crate::errors::EditError;
use crate::log;
use crate::model::{ItemId, ItemPatch, ItemSink};
use crate::render::defaults;
use crate::types::parse_finite;

/// An editable item field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Value,
    Angle,
    Radius,
    Color,
    FontSize,
    LabelColor,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Value,
        Field::Angle,
        Field::Radius,
        Field::Color,
        Field::FontSize,
        Field::LabelColor,
    ];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Value => "value",
            Field::Angle => "angle",
            Field::Radius => "radius",
            Field::Color => "color",
            Field::FontSize => "font size",
            Field::LabelColor => "label color",
        };
        f.write_str(name)
    }
}

/// Clamp a font size to the supported range.
pub fn clamp_font_size(size: f64) -> f64 {
    size.clamp(defaults::MIN_FONT_SIZE, defaults::MAX_FONT_SIZE)
}

/// Font size after one wheel tick. Scrolling up grows the text.
pub fn adjust_font_size(current: f64, delta_y: f64) -> f64 {
    let step = if delta_y < 0.0 {
        1.0
    } else if delta_y > 0.0 {
        -1.0
    } else {
        0.0
    };
    clamp_font_size(current + step)
}

/// Turn text typed into `field` into a patch. Numbers must be finite; the
/// caller keeps the old value on error.
pub fn patch_for(field: Field, text: &str) -> Result<ItemPatch, EditError> {
    let number = || {
        parse_finite(text).map_err(|source| EditError::InvalidNumber { field, source })
    };
    let patch = ItemPatch::new();
    Ok(match field {
        Field::Name => patch.with_name(text),
        Field::Value => patch.with_value(number()?),
        Field::Angle => patch.with_angle(number()?),
        Field::Radius => patch.with_radius(number()?),
        Field::Color => patch.with_color(text.trim()),
        Field::FontSize => patch.with_font_size(clamp_font_size(number()?)),
        Field::LabelColor => {
            let color = text.trim();
            patch.with_label_color((!color.is_empty()).then(|| color.to_string()))
        }
    })
}

/// Popover for editing every field of one item.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEditor {
    pub item: ItemId,
    /// Position relative to the chart's containing box.
    pub anchor: DVec2,
}

impl FieldEditor {
    pub fn new(item: ItemId, anchor: DVec2) -> Self {
        Self { item, anchor }
    }

    /// Apply `text` to `field`. On error nothing is sent to `sink`.
    pub fn edit(&self, field: Field, text: &str, sink: &mut impl ItemSink) -> Result<(), EditError> {
        match patch_for(field, text) {
            Ok(patch) => {
                sink.update_item(&self.item, patch);
                Ok(())
            }
            Err(err) => {
                log::debug!(item = %self.item, %field, "rejected edit");
                Err(err)
            }
        }
    }
}

/// Inline box for renaming an item from its label.
#[derive(Debug, Clone, PartialEq)]
pub struct RenameBox {
    pub item: ItemId,
    pub anchor: DVec2,
    pub text: String,
}

impl RenameBox {
    pub fn new(item: ItemId, anchor: DVec2, name: impl Into<String>) -> Self {
        Self {
            item,
            anchor,
            text: name.into(),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Send the typed name.
    pub fn commit(self, sink: &mut impl ItemSink) {
        sink.update_item(&self.item, ItemPatch::new().with_name(self.text));
    }
}

/// Small toolbar shown above a hovered label.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickToolbar {
    pub item: ItemId,
    pub anchor: DVec2,
}

impl QuickToolbar {
    pub const FIELDS: [Field; 3] = [Field::Value, Field::LabelColor, Field::Color];

    /// Toolbar above a label at `label_position`.
    pub fn above(item: ItemId, label_position: DVec2) -> Self {
        Self {
            item,
            anchor: label_position - dvec2(0.0, defaults::TOOLBAR_OFFSET),
        }
    }

    pub fn edit(&self, field: Field, text: &str, sink: &mut impl ItemSink) -> Result<(), EditError> {
        if !Self::FIELDS.contains(&field) {
            return Err(EditError::NotEditable { field });
        }
        let patch = patch_for(field, text)?;
        sink.update_item(&self.item, patch);
        Ok(())
    }
}
