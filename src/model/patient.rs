use serde::{Deserialize, Deserializer};
use std::fmt;

/// Roster and detail endpoints disagree on whether ids are numbers or
/// strings, so both are folded into the textual form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatientId(String);

impl PatientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PatientId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(value) => Self(value.to_string()),
            RawId::Text(value) => Self(value),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "raza", default)]
    pub breed: Option<String>,
    #[serde(rename = "edad", default)]
    pub age: Option<String>,
    #[serde(rename = "tutor", default)]
    pub guardian: String,
    #[serde(rename = "fecha", default)]
    pub visit_date: Option<String>,
    #[serde(rename = "img_folder", default)]
    pub image_folder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Observation {
    #[serde(rename = "organo")]
    pub organ: String,
    #[serde(rename = "observacion")]
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Measurement {
    #[serde(rename = "organo")]
    pub organ: String,
    #[serde(rename = "tipo_medicion")]
    pub kind: String,
    #[serde(rename = "valor", default, deserialize_with = "null_as_zero")]
    pub value: f64,
    #[serde(rename = "unidad", default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Study {
    #[serde(rename = "tipo_estudio", default)]
    pub study_type: Option<String>,
    #[serde(rename = "observaciones", default)]
    pub observations: Vec<Observation>,
    #[serde(rename = "mediciones", default)]
    pub measurements: Vec<Measurement>,
}

impl Study {
    /// Organs named by this study's measurements, first appearance wins.
    pub fn organs(&self) -> Vec<&str> {
        let mut organs: Vec<&str> = Vec::new();
        for measurement in &self.measurements {
            let organ = measurement.organ.as_str();
            if !organs.contains(&organ) {
                organs.push(organ);
            }
        }
        organs
    }

    pub fn label(&self, index: usize) -> String {
        match self.study_type.as_deref().map(str::trim) {
            Some(study_type) if !study_type.is_empty() => study_type.to_string(),
            _ => format!("Study {}", index + 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Veterinarian {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido", default)]
    pub last_name: String,
    #[serde(rename = "matricula", default)]
    pub license: Option<i64>,
}

impl Veterinarian {
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        match self.license {
            Some(license) => format!("{} (lic. {license})", name.trim()),
            None => name.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiagnosticPayload {
    #[serde(rename = "paciente")]
    pub patient: Patient,
    #[serde(rename = "estudios", default)]
    pub studies: Vec<Study>,
    #[serde(rename = "diagnostico", default)]
    pub diagnosis: Option<String>,
    #[serde(rename = "img_folder", default)]
    pub image_folder: Option<String>,
    #[serde(rename = "antecedentes", default)]
    pub history: Option<String>,
    #[serde(rename = "veterinario", default)]
    pub veterinarian: Option<Veterinarian>,
    #[serde(rename = "fecha", default)]
    pub date: Option<String>,
}

impl DiagnosticPayload {
    /// The overall diagnosis is stored as a `;`-delimited list of findings.
    pub fn findings(&self) -> Vec<&str> {
        self.diagnosis
            .as_deref()
            .map(|diagnosis| {
                diagnosis
                    .split(';')
                    .map(str::trim)
                    .filter(|finding| !finding.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn image_folder(&self) -> Option<&str> {
        self.image_folder
            .as_deref()
            .or(self.patient.image_folder.as_deref())
            .map(str::trim)
            .filter(|folder| !folder.is_empty())
    }

    pub fn study(&self, index: usize) -> Option<&Study> {
        self.studies.get(index)
    }
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}
