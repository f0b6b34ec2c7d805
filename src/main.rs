// ==========================================
// 饲料配方优化系统 - 命令行入口
// ==========================================
// 流程: 加载方案 → 构建目录（默认表 + 导入文件）→ 优化 → 输出
// 退出码: 0 最优解 / 2 无可行解 / 1 其他错误
// ==========================================

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use feed_ration::config::{ConfigManager, FormulationProfile, ProfileSource, Species};
use feed_ration::domain::{Eligibility, Nutrient, OptimizationOutcome, Ration};
use feed_ration::importer::{ImportError, IngredientImporter, IngredientImporterImpl};
use feed_ration::logging::{self, LogFormat};
use feed_ration::{Catalog, InfeasibleReport, RationOptimizer};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum PolicyArg {
    All,
    ConcentrateOnly,
    FodderOnly,
}

impl From<PolicyArg> for Eligibility {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::All => Eligibility::All,
            PolicyArg::ConcentrateOnly => Eligibility::ConcentrateOnly,
            PolicyArg::FodderOnly => Eligibility::FodderOnly,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "feed-ration")]
#[command(author, version, about = "最低成本饲料配方优化", long_about = None)]
struct Cli {
    /// 原料表（.csv/.xlsx/.xls）,默认合并到内置原料表
    #[arg(short, long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// 只使用导入的原料表,不合并内置原料
    #[arg(long, requires = "catalog")]
    replace: bool,

    /// 配方方案文件（JSON）
    #[arg(short, long, value_name = "PATH")]
    profile: Option<PathBuf>,

    /// 畜种预设（覆盖方案中的畜种与营养目标）
    #[arg(short, long)]
    species: Option<Species>,

    /// 原料类别策略（覆盖方案中的设置）
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// 以 JSON 输出结果
    #[arg(long)]
    json: bool,

    /// 以 JSON 输出日志
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_with_format(if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    });

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("错误: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    // === 步骤 1: 方案 ===
    let manager = match &cli.profile {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };
    let (mut profile, source) = manager.load().context("加载配方方案失败")?;
    if let ProfileSource::File(path) = &source {
        tracing::debug!(path = %path.display(), "使用方案文件");
    }

    if let Some(species) = cli.species {
        profile = FormulationProfile {
            policy: profile.policy,
            settings: profile.settings,
            ..FormulationProfile::preset(species)
        };
    }
    if let Some(policy) = cli.policy {
        profile.policy.eligibility = policy.into();
    }

    // === 步骤 2: 原料目录 ===
    let mut catalog = if cli.replace {
        Catalog::new()
    } else {
        Catalog::with_defaults()
    };
    if let Some(path) = &cli.catalog {
        let batch = IngredientImporterImpl::default()
            .import_file(path)
            .await
            .with_context(|| format!("读取原料表失败: {}", path.display()))?;
        let report = match batch.merge_into(&mut catalog) {
            Ok(report) => report,
            Err(ImportError::Validation(e)) => {
                for issue in e.issues() {
                    eprintln!("错误: {}", issue);
                }
                return Err(e).with_context(|| format!("原料表校验未通过: {}", path.display()));
            }
            Err(e) => return Err(e.into()),
        };
        for warning in &report.warnings {
            eprintln!("警告: 第 {} 行: {}", warning.row_number, warning.kind);
        }
    }

    // === 步骤 3: 优化 ===
    let targets = profile.effective_targets();
    let optimizer = RationOptimizer::with_settings(profile.settings.clone());
    let outcome = optimizer
        .optimize(&catalog, &targets, Some(&profile.policy))
        .context("配方参数非法")?;

    // === 步骤 4: 输出 ===
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        match &outcome {
            OptimizationOutcome::Optimal(ration) => print_ration(&profile, ration),
            OptimizationOutcome::Infeasible(report) => print_infeasible(report),
        }
    }

    Ok(if outcome.is_optimal() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}

fn print_ration(profile: &FormulationProfile, ration: &Ration) {
    println!("畜种: {}", profile.species);
    println!("{:<24} {:>10} {:>12}", "原料", "比例(%)", "成本/kg");
    for line in ration.significant_lines() {
        println!(
            "{:<24} {:>10.2} {:>12.2}",
            line.ingredient,
            line.proportion * 100.0,
            line.cost_contribution
        );
    }
    println!("单位成本: {:.2}", ration.total_cost_per_unit_mass());
    for nutrient in Nutrient::ALL {
        println!(
            "{}: {:.3} {}",
            nutrient,
            ration.nutrient_total(nutrient),
            nutrient.unit()
        );
    }
}

fn print_infeasible(report: &InfeasibleReport) {
    println!("无可行配方（可选原料 {} 种）", report.eligible_count);
    println!("{}", report.hint());
}
