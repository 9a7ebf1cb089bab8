use clap::Parser;
use part_id::{batch, cli, config, error, logging, scanner};
use cli::{Cli, Commands};
use config::Config;
use error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Identify { input, explain, output } => {
            let classifier = config.build_classifier()?;
            let perception = batch::read_perception(&input)?;

            let json = if explain {
                serde_json::to_string_pretty(&classifier.explain(&perception))?
            } else {
                serde_json::to_string_pretty(&classifier.classify(&perception))?
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    eprintln!("✔ 結果を保存: {}", path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Batch { folder, output, recursive } => {
            eprintln!("🔍 part-id - 一括分類\n");
            let classifier = config.build_classifier()?;

            let report = batch::run_batch(
                &folder,
                recursive,
                &classifier,
                config.uncertain_threshold,
                !cli.verbose,
            )?;

            let output = output.unwrap_or_else(|| folder.join(scanner::REPORT_FILE_NAME));
            report.save(&output)?;

            eprintln!("✔ {}件を分類（不確実: {}件）", report.total, report.uncertain_count);
            eprintln!("✔ 結果を保存: {}", output.display());
        }

        Commands::Categories { json } => {
            let table = config.category_table()?;

            if json {
                println!("{}", serde_json::to_string_pretty(table.rules())?);
            } else {
                for rule in table.rules() {
                    println!("{} ({})", rule.name, rule.price_range);
                    println!("  {}", rule.keywords.join(", "));
                }
            }
        }

        Commands::Config { set_categories, set_threshold, show } => {
            let mut config = config;

            if let Some(path) = set_categories {
                config.set_categories_file(path)?;
                println!("✔ カテゴリ表を設定しました");
            }

            if let Some(threshold) = set_threshold {
                config.set_uncertain_threshold(threshold)?;
                println!("✔ 閾値を設定しました");
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                match config.categories_path() {
                    Some(path) => println!("  カテゴリ表: {}", path.display()),
                    None => println!("  カテゴリ表: 組み込み"),
                }
                println!("  不確実の閾値: {}", config.uncertain_threshold);
                println!("  信頼度の上限: {}", config.calibration.max_confidence);
            }
        }
    }

    Ok(())
}
