// Engine settings, loaded from a JSON file or taken from the defaults below.
// Keyword maps and surname lists are tuning data, so they live here and not in code.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::EngineError;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub log_level: String,
    pub data: DataSettings,
    pub surnames: SurnameSettings,
    /// Checked in order; the first rule with a matching keyword wins.
    pub categories: Vec<CategoryRule>,
    pub departments: Vec<CategoryRule>,
    pub roles: RolePatterns,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DataSettings {
    pub personnel_folder: PathBuf,
    pub travel_file: PathBuf,
    pub expenditure_file: PathBuf,
    /// Extensions accepted for monthly personnel files, lowercase, without the dot.
    pub personnel_extensions: Vec<String>,
    /// Month vocabulary; a name maps to the month number it is listed under.
    pub month_names: Vec<MonthName>,
    pub max_trip_days: i64,
    pub day_first_dates: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MonthName {
    pub name: String,
    pub month: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SurnameSettings {
    pub corporate_terms: Vec<String>,
    pub prepositions: Vec<String>,
    /// Surnames too frequent in the region to suggest any relationship.
    pub common_surnames: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CategoryRule {
    pub label: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RolePatterns {
    pub secretary: String,
    pub professor: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn rule(label: &str, keywords: &[&str]) -> CategoryRule {
    CategoryRule { label: label.to_string(), keywords: strings(keywords) }
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            log_level: "info".to_string(),
            data: DataSettings::default(),
            surnames: SurnameSettings::default(),
            categories: vec![
                rule(
                    "Postos de Combustíveis",
                    &["posto", "combustiveis", "combustivel", "auto posto"],
                ),
                rule("Advocacia", &["advocacia", "advogado", "advogados", "juridico"]),
                rule(
                    "Construção",
                    &["construção", "construtora", "engenharia", "obras", "cimento", "material de construcao"],
                ),
                rule(
                    "Limpeza Pública",
                    &["limpeza", "saneamento", "residuos", "coleta de lixo", "varrição", "ramac"],
                ),
            ],
            departments: vec![
                rule(
                    "Secretaria de Saúde",
                    &["farmácia", "farmacia", "hospital", "clínica", "clinica", "saúde", "saude"],
                ),
                rule(
                    "Secretaria de Educação",
                    &["escola", "educacional", "educação", "educacao"],
                ),
                rule(
                    "Secretaria de Obras",
                    &["construção", "construtora", "empreendimentos", "engenharia", "obras"],
                ),
                rule(
                    "Secretaria de Administração",
                    &["passagens", "aéreas", "viagens", "turismo", "advogados associados", "advocacia"],
                ),
            ],
            roles: RolePatterns::default(),
        }
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        let months = [
            "janeiro", "fevereiro", "marco", "abril", "maio", "junho",
            "julho", "agosto", "setembro", "outubro", "novembro", "dezembro",
        ];
        let mut month_names: Vec<MonthName> = months
            .iter()
            .enumerate()
            .map(|(idx, name)| MonthName { name: name.to_string(), month: idx as u32 + 1 })
            .collect();
        month_names.push(MonthName { name: "março".to_string(), month: 3 });

        DataSettings {
            personnel_folder: PathBuf::from("dados_gastos"),
            travel_file: PathBuf::from("dados_viagens.xlsx"),
            expenditure_file: PathBuf::from("gastos_gerais.xlsx"),
            personnel_extensions: strings(&["xlsx", "xls", "ods", "csv"]),
            month_names,
            max_trip_days: 30,
            day_first_dates: true,
        }
    }
}

impl Default for SurnameSettings {
    fn default() -> Self {
        SurnameSettings {
            corporate_terms: strings(&[
                "LTDA", "ME", "SA", "EIRELI", "CIA", "EPP", "MEI", "FILHO", "JUNIOR", "NETO",
                "SOBRINHO",
            ]),
            prepositions: strings(&["DE", "DA", "DO", "DAS", "DOS"]),
            common_surnames: strings(&[
                "SILVA", "SANTOS", "OLIVEIRA", "SOUZA", "RODRIGUES", "FERREIRA", "ALVES", "PEREIRA",
                "LIMA", "GOMES", "COSTA", "RIBEIRO", "MARTINS", "CARVALHO", "ALMEIDA",
            ]),
        }
    }
}

impl Default for RolePatterns {
    fn default() -> Self {
        RolePatterns {
            secretary: r"SECRETÁRIO|SECRETÁRIA|SECRETARIO|SECRETARIA|SEC\.".to_string(),
            professor: "PROF".to_string(),
        }
    }
}

impl EngineSettings {
    // Keys missing from the JSON keep their default values.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| EngineError::ConfigError(e.to_string()))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, EngineError> {
        let raw = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&raw)?;
        tracing::debug!(path = %path.display(), "Loaded engine settings");
        Ok(settings)
    }

    // Resolves the data paths against a base directory (the dashboard's working folder).
    pub fn with_data_root(mut self, root: &Path) -> Self {
        self.data.personnel_folder = root.join(&self.data.personnel_folder);
        self.data.travel_file = root.join(&self.data.travel_file);
        self.data.expenditure_file = root.join(&self.data.expenditure_file);
        self
    }

    pub fn max_log_level(&self) -> Result<tracing::Level, EngineError> {
        self.log_level
            .parse::<tracing::Level>()
            .map_err(|_| {
                EngineError::ConfigError(format!("unknown log level '{}'", self.log_level))
            })
    }
}
