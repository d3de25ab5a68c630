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

//! Checks performed on settings after deserialization.

use crate::config::*;
use failure::Error;
use springnet_minimize::strong_ls;

impl Settings {
    pub fn validate(self) -> Result<ValidatedSettings, Error> {
        ensure!(
            self.spring_constant.is_finite(),
            "`spring-constant` must be finite (got {})", self.spring_constant,
        );
        ensure!(
            self.equilibrium_distance.is_finite() && self.equilibrium_distance >= 0.0,
            "`equilibrium-distance` must be finite and non-negative (got {})",
            self.equilibrium_distance,
        );
        for row in &self.cell {
            ensure!(row.iter().all(|x| x.is_finite()), "`cell` has non-finite elements: {:?}", self.cell);
        }
        if self.connections == Some(0) {
            warn!("`connections: 0` leaves every site unbonded.");
        }
        if let Some(strain) = &self.strain {
            strain.kind()?;
        }
        self.cg.validate()?;

        Ok(ValidatedSettings(self))
    }
}

impl Strain {
    /// Determine which form of strain this is.
    pub fn kind(&self) -> Result<StrainKind, Error> {
        match *self {
            Strain { diagonal: Some(diag), shear: None, tensor: None } => Ok(StrainKind::Diagonal(diag)),
            Strain { diagonal: Some(diag), shear: Some(shear), tensor: None } => Ok(StrainKind::WithShear(diag, shear)),
            Strain { diagonal: None, shear: None, tensor: Some(tensor) } => Ok(StrainKind::Tensor(tensor)),
            Strain { diagonal: None, shear: None, tensor: None } => {
                bail!("`strain` needs either `diagonal` or `tensor`.");
            },
            Strain { tensor: Some(_), .. } => {
                bail!("`strain.tensor` cannot be combined with `diagonal` or `shear`.");
            },
            Strain { diagonal: None, shear: Some(_), .. } => {
                bail!("`strain.shear` requires `strain.diagonal`.");
            },
        }
    }
}

impl Cg {
    pub fn validate(&self) -> Result<(), Error> {
        ensure!(self.step_size > 0.0, "`cg.step-size` must be positive (got {})", self.step_size);
        ensure!(
            self.gradient_tolerance > 0.0,
            "`cg.gradient-tolerance` must be positive (got {})", self.gradient_tolerance,
        );
        ensure!(self.max_iterations > 0, "`cg.max-iterations` must be nonzero");
        ensure!(
            0.0 < self.line_tolerance && self.line_tolerance < 1.0,
            "`cg.line-tolerance` must lie in (0, 1) (got {})", self.line_tolerance,
        );
        strong_ls::Settings::with_curvature(self.line_tolerance).validate()
            .map_err(|e| format_err!("`cg.line-tolerance` is unusable: {}", e))?;
        Ok(())
    }
}
