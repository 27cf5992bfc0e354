//! Julia parameter derivation.
//!
//! The four 32-bit groups of an identifier select and perturb one of eight
//! archetypal Julia constants near the Mandelbrot boundary, and choose the
//! palette's base hue and saturation.

use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::{AvatarError, AvatarResult};
use crate::identifier::Identifier;

/// Maximum offset applied to each component of the base constant is
/// `PERTURB_SCALE / 2` in either direction.
const PERTURB_SCALE: f64 = 0.08;

/// A named Julia constant producing a connected, visually rich set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Archetype {
    /// Short descriptive name.
    pub name: &'static str,
    /// The constant `c`.
    pub c: Complex,
}

/// Number of archetypal constants.
pub const ARCHETYPE_COUNT: u8 = 8;

/// Base constants, indexed by the first identifier group.
pub const ARCHETYPES: [Archetype; ARCHETYPE_COUNT as usize] = [
    Archetype { name: "dendrite", c: Complex::new(-0.8, 0.156) },
    Archetype { name: "spiral", c: Complex::new(-0.4, 0.6) },
    Archetype { name: "siegel-disk", c: Complex::new(0.285, 0.01) },
    Archetype { name: "douady-rabbit", c: Complex::new(-0.70176, -0.3842) },
    Archetype { name: "elaborate-spiral", c: Complex::new(-0.835, -0.2321) },
    Archetype { name: "feathery", c: Complex::new(-0.74543, 0.11301) },
    Archetype { name: "branching", c: Complex::new(0.355, 0.355) },
    Archetype { name: "seahorse", c: Complex::new(-0.1, 0.651) },
];

/// Parameters of one avatar's Julia set and palette.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JuliaParameters {
    /// The perturbed Julia constant.
    pub c: Complex,
    /// Base hue in degrees, `[0, 360]`.
    pub hue: f64,
    /// Base saturation, `[0.5, 0.9]`.
    pub sat_base: f64,
    /// Index into [`ARCHETYPES`] of the unperturbed constant.
    pub archetype: usize,
}

impl JuliaParameters {
    /// Derive parameters from a parsed identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarError::NonFiniteParameter`] if a derived value is not
    /// finite.
    pub fn from_identifier(id: &Identifier) -> AvatarResult<Self> {
        let a = unit(id.word(0));
        let b = unit(id.word(1));
        let c = unit(id.word(2));
        let d = unit(id.word(3));

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let archetype = ((a * f64::from(ARCHETYPE_COUNT)).floor() as usize).min(ARCHETYPES.len() - 1);
        let base = ARCHETYPES[archetype].c;

        let params = Self {
            c: Complex::new(
                base.re + (b - 0.5) * PERTURB_SCALE,
                base.im + (c - 0.5) * PERTURB_SCALE,
            ),
            hue: d * 360.0,
            sat_base: 0.5 + f64::from(id.saturation_bits()) / f64::from(u16::MAX) * 0.4,
            archetype,
        };

        params.check_finite()?;
        Ok(params)
    }

    /// The unperturbed archetype this avatar was derived from.
    #[must_use]
    pub fn archetype(&self) -> &'static Archetype {
        &ARCHETYPES[self.archetype]
    }

    fn check_finite(&self) -> AvatarResult<()> {
        if !self.c.is_finite() {
            return Err(AvatarError::NonFiniteParameter("c"));
        }
        if !self.hue.is_finite() {
            return Err(AvatarError::NonFiniteParameter("hue"));
        }
        if !self.sat_base.is_finite() {
            return Err(AvatarError::NonFiniteParameter("sat_base"));
        }
        Ok(())
    }
}

/// Parse an identifier and derive its parameters.
///
/// # Errors
///
/// Returns [`AvatarError::InvalidIdentifier`] if the identifier has fewer than
/// 32 hex digits.
pub fn derive_parameters(identifier: &str) -> AvatarResult<JuliaParameters> {
    let id = Identifier::parse(identifier)?;
    let params = JuliaParameters::from_identifier(&id)?;
    tracing::trace!(
        id = %id,
        archetype = params.archetype().name,
        c = %params.c,
        hue = params.hue,
        sat_base = params.sat_base,
        "derived julia parameters"
    );
    Ok(params)
}

/// Normalize a 32-bit group to `[0, 1]`.
fn unit(word: u32) -> f64 {
    f64::from(word) / f64::from(u32::MAX)
}
