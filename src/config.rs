//! Loading of reflectance parameters.
//!
//! The parameters are described with json, for instance:
//!
//! ```json
//! {
//!     "reflectance_type": "lunar_lambert",
//!     "reflectance_coeffs": [1.0, -0.019, 0.000242, -0.00000146],
//!     "phase_coeffs": [0.0, 0.0],
//!     "haze": [0.01],
//!     "steepness_factor": 1.0
//! }
//! ```
//!
//! `reflectance_type` may also be the numeric id of the model. Everything but
//! the type is optional; models other than mmpf and the experimental one fall
//! back to their usual coefficients.

use crate::error::Result;
use crate::geometry::{GeometrySample, Illumination};
use crate::intensity::{self, Haze};
use crate::reflectance::{
    Charon, Hapke, LunarLambert, PhaseCoeffs, Reflectance, ReflectanceModel, ReflectanceType,
};

use serde_json::{Map, Value};
use simple_error::{bail, try_with, SimpleError, SimpleResult};
use tracing::debug;

use std::convert::TryFrom;

/// Everything needed to go from geometry to a predicted intensity.
#[derive(Clone, Debug, PartialEq)]
pub struct ReflParams {
    pub model: ReflectanceModel,
    pub phase: PhaseCoeffs,
    pub haze: Haze,
    pub steepness_factor: f64,
}

impl Default for ReflParams {
    fn default() -> Self {
        ReflParams {
            model: ReflectanceModel::LunarLambert(LunarLambert::default()),
            phase: PhaseCoeffs::default(),
            haze: Haze::none(),
            steepness_factor: 1.,
        }
    }
}

impl ReflParams {
    pub fn from_json_str(s: &str) -> SimpleResult<Self> {
        let json: Value = try_with!(serde_json::from_str(s), "invalid reflectance json");
        match json {
            Value::Object(obj) => Self::from_json(&obj),
            _ => bail!("reflectance parameters must be a json object"),
        }
    }

    pub fn from_json(json: &Map<String, Value>) -> SimpleResult<Self> {
        let model_type = match json.get("reflectance_type") {
            Some(Value::String(name)) => name.parse::<ReflectanceType>()?,
            Some(Value::Number(id)) => match id.as_i64() {
                Some(id) => ReflectanceType::from_index(i32::try_from(id).unwrap_or(-1)),
                None => bail!("reflectance_type id must be an integer"),
            },
            Some(_) => bail!("reflectance_type must be a string or an integer"),
            None => bail!("reflectance parameters missing reflectance_type property"),
        };

        let model = match json.get("reflectance_coeffs") {
            Some(coeffs) => {
                let coeffs = parse_f64_array(coeffs, "reflectance_coeffs")?;
                try_with!(
                    ReflectanceModel::from_coeffs(model_type, &coeffs),
                    "bad reflectance_coeffs"
                )
            }
            None => default_model(model_type)?,
        };

        let phase = match json.get("phase_coeffs") {
            Some(phase) => {
                let phase = parse_f64_array(phase, "phase_coeffs")?;
                if phase.len() != 2 {
                    bail!("phase_coeffs must hold exactly two values");
                }
                PhaseCoeffs::new(phase[0], phase[1])
            }
            None => PhaseCoeffs::default(),
        };

        let haze = match json.get("haze") {
            Some(haze) => {
                let haze = parse_f64_array(haze, "haze")?;
                try_with!(Haze::from_slice(&haze), "bad haze")
            }
            None => Haze::none(),
        };

        let steepness_factor = match json.get("steepness_factor") {
            Some(v) => match v.as_f64() {
                Some(s) if s > 0. && s.is_finite() => s,
                _ => bail!("steepness_factor must be a positive number"),
            },
            None => 1.,
        };

        debug!(
            model = %model.model_type(),
            num_haze_coeffs = haze.len(),
            steepness_factor,
            "loaded reflectance parameters"
        );

        Ok(ReflParams {
            model,
            phase,
            haze,
            steepness_factor,
        })
    }

    /// Reflectance of `sample` under `illum` with these parameters.
    pub fn reflectance(
        &self,
        illum: Illumination,
        sample: GeometrySample,
    ) -> Result<Reflectance> {
        self.model.reflectance(illum, sample, self.phase)
    }

    pub fn intensity(&self, albedo: f64, reflectance: f64, exposure: f64) -> f64 {
        intensity::calc_intensity(
            albedo,
            reflectance,
            exposure,
            self.steepness_factor,
            &self.haze,
        )
    }

    pub fn albedo(&self, intensity: f64, reflectance: f64, exposure: f64) -> f64 {
        intensity::calc_albedo(
            intensity,
            reflectance,
            exposure,
            self.steepness_factor,
            &self.haze,
        )
    }
}

// The coefficients used when a configuration doesn't give any:
fn default_model(model_type: ReflectanceType) -> SimpleResult<ReflectanceModel> {
    Ok(match model_type {
        ReflectanceType::None => ReflectanceModel::None,
        ReflectanceType::Lambert => ReflectanceModel::Lambert,
        ReflectanceType::LunarLambert => ReflectanceModel::LunarLambert(LunarLambert::default()),
        ReflectanceType::Hapke => ReflectanceModel::Hapke(Hapke::default()),
        ReflectanceType::Charon => ReflectanceModel::Charon(Charon::default()),
        ReflectanceType::ArbitraryModel | ReflectanceType::Mmpf => {
            bail!("the {} model requires reflectance_coeffs", model_type)
        }
    })
}

fn parse_f64_array(value: &Value, name: &str) -> SimpleResult<Vec<f64>> {
    let array = match value {
        Value::Array(a) => a,
        _ => bail!("{} must be an array of numbers", name),
    };
    array
        .iter()
        .map(|v| match v.as_f64() {
            Some(f) => Ok(f),
            None => Err(SimpleError::new(format!("{} must only contain numbers", name))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflectance::{ExperimentalLunarLambert, Mmpf, Photometry};

    #[test]
    fn full_description() {
        let params = ReflParams::from_json_str(
            r#"{
                "reflectance_type": "hapke",
                "reflectance_coeffs": [0.5, 0.1, 0.2, 0.3, -0.4],
                "phase_coeffs": [0.25, 0.5],
                "haze": [0.01, 0.2],
                "steepness_factor": 2.0
            }"#,
        )
        .unwrap();
        assert_eq!(
            params.model,
            ReflectanceModel::Hapke(Hapke::new(0.5, 0.1, 0.2, 0.3, 0.4))
        );
        assert_eq!(params.phase, PhaseCoeffs::new(0.25, 0.5));
        assert_eq!(params.haze.as_slice(), &[0.01, 0.2]);
        assert_eq!(params.steepness_factor, 2.);
    }

    #[test]
    fn defaults() {
        let params = ReflParams::from_json_str(r#"{ "reflectance_type": "lunar_lambert" }"#)
            .unwrap();
        assert_eq!(params, ReflParams::default());

        let params = ReflParams::from_json_str(r#"{ "reflectance_type": 5 }"#).unwrap();
        assert_eq!(params.model, ReflectanceModel::Charon(Charon::default()));
    }

    #[test]
    fn numeric_ids() {
        let params = ReflParams::from_json_str(
            r#"{ "reflectance_type": 6, "reflectance_coeffs": [1, 2, 3, 4, 5, 6, 7] }"#,
        )
        .unwrap();
        assert_eq!(
            params.model,
            ReflectanceModel::Mmpf(Mmpf::new([1., 2., 3., 4., 5., 6., 7.]))
        );

        // An unknown id turns shading off:
        let params = ReflParams::from_json_str(r#"{ "reflectance_type": 12 }"#).unwrap();
        assert_eq!(params.model, ReflectanceModel::None);
    }

    #[test]
    fn uniform_buffer_is_accepted() {
        let coeffs: Vec<String> = (0..16).map(|i| format!("{}.0", i)).collect();
        let json = format!(
            r#"{{ "reflectance_type": "arbitrary_model", "reflectance_coeffs": [{}] }}"#,
            coeffs.join(", ")
        );
        let params = ReflParams::from_json_str(&json).unwrap();
        let expected: Vec<f64> = (0..16).map(|i| i as f64).collect();
        assert_eq!(
            params.model,
            ReflectanceModel::ExperimentalLunarLambert(
                ExperimentalLunarLambert::from_coeffs(&expected).unwrap()
            )
        );
    }

    #[test]
    fn rejects_bad_input() {
        let bad = [
            "[]",
            "{}",
            r#"{ "reflectance_type": "phong" }"#,
            r#"{ "reflectance_type": true }"#,
            r#"{ "reflectance_type": "mmpf" }"#,
            r#"{ "reflectance_type": "hapke", "reflectance_coeffs": [1, 2] }"#,
            r#"{ "reflectance_type": "lambert", "reflectance_coeffs": ["a"] }"#,
            r#"{ "reflectance_type": "lambert", "phase_coeffs": [1] }"#,
            r#"{ "reflectance_type": "lambert", "haze": [0, 0, 0, 0, 0, 0, 0] }"#,
            r#"{ "reflectance_type": "lambert", "steepness_factor": 0 }"#,
            "not json",
        ];
        for json in bad.iter() {
            assert!(ReflParams::from_json_str(json).is_err(), "accepted {}", json);
        }
    }

    #[test]
    fn forwards_to_intensity_transform() {
        let params = ReflParams::from_json_str(
            r#"{ "reflectance_type": "lambert", "haze": [0.1], "steepness_factor": 2 }"#,
        )
        .unwrap();
        let intensity = params.intensity(0.5, 0.8, 4.);
        assert_eq!(intensity, 0.5 * 0.8 * 2. + 0.1);
        assert!((params.albedo(intensity, 0.8, 4.) - 0.5).abs() < 1e-12);
    }
}
