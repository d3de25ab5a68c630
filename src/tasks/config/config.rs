/* ********************************************************************** **
**  This file is part of springnet.                                       **
**                                                                        **
**  springnet is free software: you can redistribute it and/or modify it  **
**  under the terms of the GNU General Public License as published by the **
**  Free Software Foundation, either version 3 of the License, or (at     **
**  your option) any later version.                                       **
**                                                                        **
**      http://www.gnu.org/licenses/                                      **
**                                                                        **
** Do note that, while the whole of springnet is licensed under the GPL,  **
** many parts of it are licensed under more permissive terms.             **
** ********************************************************************** */

// NOTE: Please make sure to use the YamlRead trait when deserializing these types!

use serde::de;

pub use springnet_structure::ImageConvention;

/// Root settings object.
///
/// This is what you should deserialize.
#[derive(Serialize)]
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSettings(pub Settings);

/// Raw deserialized form of settings.
///
/// You shouldn't deserialize this type directly; deserialize `ValidatedSettings` instead,
/// so that additional validation can be performed.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// Cell edges, as rows.
    pub cell: [[f64; 3]; 3],

    #[serde(default = "settings__spring_constant")]
    pub spring_constant: f64,

    #[serde(default = "settings__equilibrium_distance")]
    pub equilibrium_distance: f64,

    /// Neighbours per site.
    ///
    /// If given, every site must list exactly this many neighbours.
    /// If omitted, sites may list different numbers of neighbours, and
    /// short lists are padded.
    #[serde(default)]
    pub connections: Option<usize>,

    /// How to choose the periodic image of a bond.
    ///
    /// `per-axis` (the default) is exact for orthogonal cells.
    /// `nearest` does a full search, for strongly sheared cells.
    #[serde(default)]
    pub image_convention: ImageConvention,

    /// Strain applied to the cell before relaxation.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strain: Option<Strain>,

    /// See the type for documentation.
    #[serde(default)]
    pub cg: Cg,
}
fn settings__spring_constant() -> f64 { 1.0 }
fn settings__equilibrium_distance() -> f64 { 1.0 }

derive_yaml_read!{ValidatedSettings}

impl<'de> de::Deserialize<'de> for ValidatedSettings {
    fn deserialize<D: de::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let cereal: Settings = de::Deserialize::deserialize(deserializer)?;

        cereal.validate().map_err(de::Error::custom)
    }
}

/// Strain applied to the cell.
///
/// Either `diagonal` (with optional `shear`) or `tensor` must be given.
///
/// # Example:
///
/// ```yaml
/// strain:
///   diagonal: [1.01, 1.0, 1.0]
///   shear: [0.0, 0.0, 0.02]
/// ```
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Strain {
    /// Stretch factors along x, y and z.  `1.0` is unstrained.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagonal: Option<[f64; 3]>,

    /// Symmetric shear components, in the order `yz`, `xz`, `xy`.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shear: Option<[f64; 3]>,

    /// A complete strain tensor.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tensor: Option<[[f64; 3]; 3]>,
}

/// The validated shape of a [`Strain`].
#[derive(Debug, Clone, PartialEq)]
pub enum StrainKind {
    Diagonal([f64; 3]),
    WithShear([f64; 3], [f64; 3]),
    Tensor([[f64; 3]; 3]),
}

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Cg {
    /// Length of the first trial step.
    #[serde(default = "cg__step_size")]
    pub step_size: f64,

    /// Curvature tolerance of each linesearch, in `(0, 1)`.
    /// Smaller values make each line minimization more exact.
    #[serde(default = "cg__line_tolerance")]
    pub line_tolerance: f64,

    /// Relaxation has converged once the norm of the gradient is below this.
    #[serde(default = "cg__gradient_tolerance")]
    pub gradient_tolerance: f64,

    #[serde(default = "cg__max_iterations")]
    pub max_iterations: u32,
}
fn cg__step_size() -> f64 { 0.01 }
fn cg__line_tolerance() -> f64 { 0.1 }
fn cg__gradient_tolerance() -> f64 { 1e-6 }
fn cg__max_iterations() -> u32 { 100 }

impl Default for Cg {
    fn default() -> Self {
        Cg {
            step_size: cg__step_size(),
            line_tolerance: cg__line_tolerance(),
            gradient_tolerance: cg__gradient_tolerance(),
            max_iterations: cg__max_iterations(),
        }
    }
}

/// Sites of a spring network, read from their own file.
///
/// A site's index is its position in the list.
///
/// # Example:
///
/// ```yaml
/// sites:
///   - position: [0.0, 0.0, 0.0]
///     neighbours: [1, 2]
///   - position: [1.5, 0.0, 0.0]
///     neighbours: [2, 0]
///   - position: [0.7, 1.3, 0.0]
///     neighbours: [0, 1]
/// ```
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct StructureInput {
    pub sites: Vec<SiteInput>,
}
derive_yaml_read!{StructureInput}

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct SiteInput {
    pub position: [f64; 3],
    #[serde(default)]
    pub neighbours: Vec<usize>,
}
