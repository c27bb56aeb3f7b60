use anyhow::Result;
use colored::Colorize;
use logion_infrastructure::ConfigService;
use std::path::Path;

pub fn run(config_service: &ConfigService) -> Result<()> {
    let report = config_service.init()?;

    print_file("config", &report.config_path, report.config_created);
    print_file("secret", &report.secret_path, report.secret_created);

    if report.secret_created {
        println!(
            "{}",
            "Set `user_seed` in the secret file before running the demo.".yellow()
        );
    }

    Ok(())
}

fn print_file(label: &str, path: &Path, created: bool) {
    if created {
        println!("{} {} {}", "Created".green(), label, path.display());
    } else {
        println!(
            "{} {} {}",
            "Kept existing".bright_black(),
            label,
            path.display()
        );
    }
}
