//! Quantity text-field state.
//!
//! The quantity widget lets the user clear the field while typing, which
//! means the raw text is transiently not a number. Modeling that as a
//! tagged state instead of a loose string-or-number union keeps invalid
//! intermediate input out of the cart: only a committed integer ever
//! reaches [`crate::cart::CartStore`].

/// State of one quantity input widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityField {
    /// The last committed quantity, shown when the user is not typing.
    Committed(u32),
    /// Raw text mid-edit. Never contributes to totals.
    Editing(String),
}

impl QuantityField {
    /// Start from a committed quantity (usually the cart line's current
    /// value, or 1 for a fresh product card).
    #[must_use]
    pub const fn new(quantity: u32) -> Self {
        Self::Committed(quantity)
    }

    /// Apply a text change from the widget.
    ///
    /// - Empty text enters the transient editing state; nothing commits.
    /// - Text that parses as a non-negative integer commits immediately and
    ///   is returned so the caller can forward it to the cart. Committing
    ///   `0` on an existing cart line means "remove the line".
    /// - Anything else keeps the previous state.
    pub fn input(&mut self, raw: &str) -> Option<u32> {
        if raw.is_empty() {
            *self = Self::Editing(String::new());
            return None;
        }

        match raw.trim().parse::<u32>() {
            Ok(value) => {
                *self = Self::Committed(value);
                Some(value)
            }
            Err(_) => None,
        }
    }

    /// The widget lost focus.
    ///
    /// A field left empty (or below 1) falls back to a committed `1`, which
    /// is returned so the caller can synchronize the cart line.
    pub fn blur(&mut self) -> Option<u32> {
        match self {
            Self::Editing(raw) if raw.trim().parse::<u32>().ok().is_none_or(|v| v < 1) => {
                *self = Self::Committed(1);
                Some(1)
            }
            Self::Editing(raw) => {
                // Shouldn't normally happen: numeric input commits on entry.
                let value = raw.trim().parse::<u32>().unwrap_or(1);
                *self = Self::Committed(value);
                Some(value)
            }
            Self::Committed(_) => None,
        }
    }

    /// Stepper "+" button: commit the next value, clamped to `max`.
    pub fn increment(&mut self, max: u32) -> u32 {
        let next = match *self {
            Self::Committed(v) => v.saturating_add(1).min(max),
            Self::Editing(_) => 1.min(max),
        };
        *self = Self::Committed(next);
        next
    }

    /// Stepper "-" button: commit the previous value, clamped to `min`.
    pub fn decrement(&mut self, min: u32) -> u32 {
        let next = match *self {
            Self::Committed(v) => v.saturating_sub(1).max(min),
            Self::Editing(_) => min,
        };
        *self = Self::Committed(next);
        next
    }

    /// The committed quantity, if the field is not mid-edit.
    #[must_use]
    pub const fn committed(&self) -> Option<u32> {
        match self {
            Self::Committed(v) => Some(*v),
            Self::Editing(_) => None,
        }
    }

    /// The text to render in the widget.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Committed(v) => v.to_string(),
            Self::Editing(raw) => raw.clone(),
        }
    }
}
