// ==========================================
// 饲料配方优化系统 - 配方方案 集成测试
// ==========================================

use feed_ration::catalog::Catalog;
use feed_ration::config::{
    ConfigError, ConfigManager, FormulationProfile, ProfileSource, Species, PROFILE_ENV_VAR,
};
use feed_ration::domain::{Category, ConfigurationError, Eligibility, RationPolicy};
use feed_ration::engine::RationOptimizer;
use tempfile::TempDir;

#[test]
fn test_profile_round_trip_and_optimize() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_path(dir.path().join("rabbit.json"));

    let profile = FormulationProfile {
        policy: RationPolicy::default()
            .with_cap(Category::Concentrate, 0.4)
            .with_protein_slack(3.0),
        ..FormulationProfile::preset(Species::Rabbit)
    };
    manager.save(&profile).unwrap();

    let (loaded, source) = manager.load().unwrap();
    assert_eq!(loaded, profile);
    assert!(matches!(source, ProfileSource::File(_)));

    let outcome = RationOptimizer::with_settings(loaded.settings.clone())
        .optimize(
            &Catalog::with_defaults(),
            &loaded.effective_targets(),
            Some(&loaded.policy),
        )
        .unwrap();
    let ration = outcome.ration().expect("兔用方案应可行");
    assert!(ration
        .lines()
        .iter()
        .filter(|l| l.category == Category::Concentrate)
        .all(|l| l.proportion <= 0.4 + 1e-6));
}

#[test]
fn test_env_var_selects_profile_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("env-profile.json");
    std::fs::write(
        &path,
        r#"{"species":"poultry","policy":{"eligibility":{"mode":"fodder_only"}}}"#,
    )
    .unwrap();

    std::env::set_var(PROFILE_ENV_VAR, &path);
    let result = ConfigManager::new().load();
    std::env::remove_var(PROFILE_ENV_VAR);

    let (profile, source) = result.unwrap();
    assert_eq!(source, ProfileSource::File(path));
    assert_eq!(profile.species, Species::Poultry);
    assert_eq!(profile.policy.eligibility, Eligibility::FodderOnly);
    assert_eq!(profile.effective_targets(), Species::Poultry.default_targets());
}

#[test]
fn test_invalid_profile_is_rejected_before_optimizing() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_path(dir.path().join("bad.json"));

    let bad = FormulationProfile {
        policy: RationPolicy::default().with_cap(Category::Mineral, -0.1),
        ..FormulationProfile::default()
    };
    assert!(matches!(
        manager.save(&bad),
        Err(ConfigError::Invalid(ConfigurationError::InvalidCap { .. }))
    ));
    assert!(!dir.path().join("bad.json").exists());
}
