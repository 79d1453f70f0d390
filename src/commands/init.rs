use crate::io;
use anyhow::Result;
use std::path::PathBuf;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from("riskmap.toml");

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let default_config = r#"# Riskmap Configuration

[thresholds]
# Scoring thresholds: one risk point each when exceeded
hba1c = 7.0
systolic_bp = 140

[output]
default_format = "terminal"

# Base cost table: proactive (early) vs reactive (late) cost per category.
# Scaled per patient by the tier multiplier during analysis.

[[costs.bands]]
category = "Initial Consultation"
early = 250.0
late = 250.0

[[costs.bands]]
category = "Diagnostic Tests"
early = 800.0
late = 1200.0

[[costs.bands]]
category = "Preventive Medication"
early = 180.0
late = 450.0

[[costs.bands]]
category = "Regular Monitoring"
early = 400.0
late = 800.0

[[costs.bands]]
category = "Emergency Interventions"
early = 0.0
late = 3500.0

[[costs.bands]]
category = "Hospitalization"
early = 0.0
late = 12000.0

[[costs.bands]]
category = "Surgical Procedures"
early = 0.0
late = 25000.0

[[costs.bands]]
category = "Rehabilitation & Recovery"
early = 500.0
late = 2800.0
"#;

    io::write_file(&config_path, default_config)?;
    println!("Created riskmap.toml configuration file");

    Ok(())
}
