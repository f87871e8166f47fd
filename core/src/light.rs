use serde::{Deserialize, Serialize};

/// State of a single light on the board.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Light {
    Dark,
    Lit,
}

impl Light {
    pub const fn is_lit(self) -> bool {
        matches!(self, Self::Lit)
    }

    /// The opposite state.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Lit,
            Self::Lit => Self::Dark,
        }
    }

    /// Flips the light in place.
    pub fn toggle(&mut self) {
        *self = self.toggled();
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::Dark
    }
}

impl From<bool> for Light {
    fn from(lit: bool) -> Self {
        if lit { Self::Lit } else { Self::Dark }
    }
}

impl From<Light> for bool {
    fn from(light: Light) -> Self {
        light.is_lit()
    }
}
