//! Integration tests for the Payroll Liquidation Engine.
//!
//! This test suite drives complete liquidations through the public API:
//! - Reference scenarios (plain salary, article 50 gratification)
//! - Proration, overtime and allowances
//! - Contribution-base cap and deduction ceiling
//! - Company overrides loaded from YAML
//! - Indicator sources, settings store and repository collaborators
//! - Validation errors

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{Value, json};

use liquidation_engine::calculation::{LiquidationRequest, calculate_liquidation, liquidate};
use liquidation_engine::config::{
    CompanyOverride, ConfigLoader, ConfigSource, ConfigurationMerger, EffectiveConfiguration,
    InMemorySettingsStore, LegalParameterStore, SettingsStore,
};
use liquidation_engine::error::ValidationError;
use liquidation_engine::indicators::{
    CachedIndicatorProvider, EconomicIndicators, FileIndicatorSource, IndicatorProvider,
    StaticIndicatorSource,
};
use liquidation_engine::models::{LiquidationResult, Severity, WarningCode};
use liquidation_engine::persistence::InMemoryLiquidationRepository;
use liquidation_engine::service::LiquidationService;

// =============================================================================
// Test Helpers
// =============================================================================

fn temp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("liquidation_it_{}_{}", name, nanos));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn employee_json(base_salary: i64, contract_type: &str, gratification_mode: &str) -> Value {
    json!({
        "id": "emp_001",
        "national_id": "12.345.678-5",
        "first_name": "Camila",
        "last_name": "Soto",
        "base_salary": base_salary,
        "weekly_hours": "44",
        "contract_type": contract_type,
        "pension_administrator": "habitat",
        "health_institution": "fonasa",
        "family_dependents": 0,
        "gratification_mode": gratification_mode
    })
}

fn create_request(
    employee: Value,
    days_worked: u32,
    income: Value,
    deductions: Value,
) -> LiquidationRequest {
    serde_json::from_value(json!({
        "employee": employee,
        "period": { "year": 2025, "month": 3, "days_worked": days_worked },
        "income": income,
        "deductions": deductions
    }))
    .expect("request JSON should deserialize")
}

fn simple_request(base_salary: i64) -> LiquidationRequest {
    create_request(
        employee_json(base_salary, "indefinite", "none"),
        30,
        json!({}),
        json!({}),
    )
}

fn run(request: &LiquidationRequest) -> LiquidationResult {
    liquidate(request, &LegalParameterStore::effective_defaults()).expect("request should be valid")
}

fn assert_totals_consistent(result: &LiquidationResult) {
    assert_eq!(
        result.gross_total,
        result.taxable_income.total + result.non_taxable_income.total,
        "gross must equal taxable plus non-taxable"
    );
    assert_eq!(
        result.total_deductions,
        result.previsional.total + result.income_tax + result.other_deductions,
        "deductions must equal previsional plus tax plus other"
    );
    assert_eq!(
        result.net_pay,
        result.gross_total - result.total_deductions,
        "net must equal gross minus deductions"
    );
}

fn service_with(store: InMemorySettingsStore, indicators: EconomicIndicators) -> LiquidationService {
    LiquidationService::new(
        Arc::new(store),
        Arc::new(CachedIndicatorProvider::new(StaticIndicatorSource::new(indicators))),
        Arc::new(InMemoryLiquidationRepository::new()),
    )
}

// =============================================================================
// Reference Scenarios
// =============================================================================

/// Scenario A: 1,000,000 base, full month, indefinite, AFP Habitat 1.27%
#[test]
fn test_scenario_a_plain_salary() {
    let result = run(&simple_request(1_000_000));

    assert_eq!(result.taxable_income.base_salary, 1_000_000);
    assert_eq!(result.taxable_income.gratification, 0);
    assert_eq!(result.taxable_income.legal_gratification, 0);
    assert_eq!(result.previsional.pension_base, 100_000);
    assert_eq!(result.previsional.pension_commission, 12_700);
    assert_eq!(result.previsional.health, 70_000);
    assert_eq!(result.previsional.unemployment, 6_000);
    assert_eq!(result.income_tax, 2_597);
    assert_eq!(result.gross_total, 1_000_000);
    assert_eq!(result.total_deductions, 191_297);
    assert_eq!(result.net_pay, 808_703);
    assert!(!result.cap_exceeded);
    assert_totals_consistent(&result);
}

/// Scenario B: 2,000,000 base under article 50 hits the 209,396 monthly cap
#[test]
fn test_scenario_b_article_50_cap() {
    let request = create_request(
        employee_json(2_000_000, "indefinite", "article_50"),
        30,
        json!({}),
        json!({}),
    );
    let result = run(&request);

    assert_eq!(result.taxable_income.legal_gratification, 209_396);
    assert_eq!(result.taxable_income.total, 2_209_396);
    assert!(result.has_warning(WarningCode::GratificationCapApplied));
    assert!(!result.cap_exceeded);
    assert_totals_consistent(&result);
}

#[test]
fn test_article_50_below_cap_records_info() {
    let request = create_request(
        employee_json(600_000, "indefinite", "article_50"),
        30,
        json!({}),
        json!({}),
    );
    let result = run(&request);

    assert_eq!(result.taxable_income.legal_gratification, 150_000);
    let warning = result
        .warnings
        .iter()
        .find(|w| w.code == WarningCode::GratificationWithinCap)
        .expect("within-cap warning");
    assert_eq!(warning.severity, Severity::Info);
}

// =============================================================================
// Proration, Overtime and Allowances
// =============================================================================

#[test]
fn test_half_month_prorates_base() {
    let request = create_request(
        employee_json(1_000_000, "indefinite", "none"),
        15,
        json!({}),
        json!({}),
    );
    let result = run(&request);
    assert_eq!(result.taxable_income.base_salary, 500_000);
    assert_totals_consistent(&result);
}

#[test]
fn test_overtime_hours_are_paid_when_no_amount_given() {
    let mut employee = employee_json(900_000, "indefinite", "none");
    employee["weekly_hours"] = json!("45");
    let request: LiquidationRequest = serde_json::from_value(json!({
        "employee": employee,
        "period": { "year": 2025, "month": 3, "days_worked": 30, "overtime_hours": "10" }
    }))
    .unwrap();

    // 900_000 * 28 / 30 / 180 = 4_666.67 per hour, at 1.5 for 10 hours
    let result = run(&request);
    assert_eq!(result.taxable_income.overtime, 70_000);
    assert!(result.has_warning(WarningCode::OvertimeDerivedFromHours));
}

#[test]
fn test_allowances_are_non_taxable() {
    let with_allowances = create_request(
        employee_json(1_000_000, "indefinite", "none"),
        30,
        json!({ "meal_allowance": 60_000, "transport_allowance": 40_000, "cash_allowance": 15_000 }),
        json!({}),
    );
    let plain = run(&simple_request(1_000_000));
    let result = run(&with_allowances);

    assert_eq!(result.non_taxable_income.total, 115_000);
    assert_eq!(result.gross_total, 1_115_000);
    assert_eq!(result.previsional, plain.previsional);
    assert_eq!(result.income_tax, plain.income_tax);
    assert_eq!(result.net_pay, plain.net_pay + 115_000);
}

#[test]
fn test_family_allowance_with_dependents() {
    let mut employee = employee_json(500_000, "indefinite", "none");
    employee["family_dependents"] = json!(3);
    let result = run(&create_request(employee, 30, json!({}), json!({})));

    assert_eq!(result.non_taxable_income.family_allowance, 63_729);
    assert!(result.has_warning(WarningCode::FamilyAllowanceTier));
    assert_totals_consistent(&result);
}

#[test]
fn test_fixed_term_contract_costs() {
    let request = create_request(
        employee_json(1_000_000, "fixed_term", "none"),
        30,
        json!({}),
        json!({}),
    );
    let result = run(&request);

    assert_eq!(result.previsional.unemployment, 0);
    assert_eq!(result.employer_costs.unemployment, 30_000);
    assert_eq!(result.employer_costs.disability_insurance, 18_800);
    assert_eq!(result.employer_costs.work_injury, 9_300);
}

// =============================================================================
// Caps and Ceilings
// =============================================================================

#[test]
fn test_high_salary_is_capped_for_deductions_only() {
    let result = run(&simple_request(6_000_000));

    assert!(result.cap_exceeded);
    assert_eq!(result.gross_total, 6_000_000);
    assert_eq!(result.contribution_base, 3_328_640);
    assert_eq!(result.previsional.pension_base, 332_864);
    assert_eq!(result.employer_costs.disability_insurance, 62_578);
    assert!(result.has_warning(WarningCode::ContributionCapApplied));
    assert_totals_consistent(&result);
}

#[test]
fn test_deduction_ceiling_is_a_warning_not_an_error() {
    let request = create_request(
        employee_json(800_000, "indefinite", "none"),
        30,
        json!({}),
        json!({ "loans": 200_000, "advances": 150_000 }),
    );
    let result = run(&request);

    assert!(result.has_warning(WarningCode::DeductionCeilingExceeded));
    assert_eq!(result.other_deductions, 350_000);
    assert_totals_consistent(&result);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_merge_round_trip_with_no_override() {
    assert_eq!(
        ConfigurationMerger::merge(None),
        LegalParameterStore::effective_defaults()
    );
    assert_eq!(
        ConfigurationMerger::merge(Some(&CompanyOverride::default())),
        LegalParameterStore::effective_defaults()
    );
}

#[test]
fn test_company_yaml_override_replaces_whole_table() {
    let dir = temp_dir("company_yaml");
    fs::write(
        dir.join("acme.yaml"),
        r#"
pension_administrators:
  - code: habitat
    name: AFP Habitat
    commission_pct: "1.00"
    disability_pct: "1.50"
"#,
    )
    .unwrap();

    let overrides = ConfigLoader::load_directory(&dir).unwrap();
    let config = ConfigurationMerger::merge(overrides.get("acme"));
    assert!(matches!(config.source(), ConfigSource::CompanyOverride { .. }));
    assert_eq!(config.pension_administrators().len(), 1);

    let habitat = run_with(&simple_request(1_000_000), &config);
    assert_eq!(habitat.previsional.pension_commission, 10_000);
    assert_eq!(habitat.employer_costs.disability_insurance, 15_000);

    // Modelo is not in the replacement table, so the fallback commission applies
    let mut modelo_request = simple_request(1_000_000);
    if let Some(employee) = modelo_request.employee.as_mut() {
        employee.pension_administrator = "modelo".to_string();
    }
    let modelo = run_with(&modelo_request, &config);
    assert_eq!(modelo.previsional.pension_commission, 14_400);
    assert!(modelo.has_warning(WarningCode::UnknownPensionAdministrator));

    fs::remove_dir_all(&dir).unwrap();
}

fn run_with(
    request: &LiquidationRequest,
    config: &EffectiveConfiguration,
) -> LiquidationResult {
    let employee = request.employee.as_ref().unwrap();
    calculate_liquidation(
        employee,
        &request.period,
        &request.income,
        &request.deductions,
        config,
    )
}

// =============================================================================
// Collaborators
// =============================================================================

#[tokio::test]
async fn test_service_uses_file_indicators() {
    let dir = temp_dir("indicators");
    let path = dir.join("indicators.yaml");
    fs::write(
        &path,
        "minimum_wage: 600000\nuf_value: \"40000\"\nutm_value: \"70000\"\nas_of: 2026-01-01\n",
    )
    .unwrap();

    let service = LiquidationService::new(
        Arc::new(InMemorySettingsStore::new()),
        Arc::new(CachedIndicatorProvider::new(FileIndicatorSource::new(&path))),
        Arc::new(InMemoryLiquidationRepository::new()),
    );

    let config = service.effective_configuration("acme").await;
    assert_eq!(config.indicators().minimum_wage, 600_000);
    assert_eq!(config.income_limits().minimum_wage, 600_000);
    assert_eq!(config.contribution_cap(), 3_372_000);

    fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_missing_indicator_file_falls_back() {
    let provider = CachedIndicatorProvider::new(FileIndicatorSource::new("/nonexistent/ind.yaml"));
    assert_eq!(provider.get_indicators().await, EconomicIndicators::fallback());
}

#[tokio::test]
async fn test_settings_update_changes_next_liquidation() {
    let store = InMemorySettingsStore::new();
    store
        .update(
            "acme",
            serde_yaml::from_str(
                "income_limits:\n  contribution_cap_uf: \"20\"\n  minimum_wage: 529000\n  family_allowance_ceiling: 1228614\n",
            )
            .unwrap(),
        )
        .await
        .unwrap();
    let service = service_with(store, EconomicIndicators::fallback());

    let result = service
        .liquidate("acme", &simple_request(1_000_000))
        .await
        .unwrap();

    // 20 * 39_485.65 = 789_713
    assert!(result.cap_exceeded);
    assert_eq!(result.contribution_base, 789_713);
}

#[tokio::test]
async fn test_store_is_idempotent_per_period() {
    let service = service_with(InMemorySettingsStore::new(), EconomicIndicators::fallback());
    let request = simple_request(1_000_000);

    let (first, _) = service.liquidate_and_store("acme", &request).await.unwrap();
    let (second, _) = service.liquidate_and_store("acme", &request).await.unwrap();
    let (other_company, _) = service.liquidate_and_store("globex", &request).await.unwrap();

    assert_eq!(first, second);
    assert_ne!(first, other_company);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_invalid_request_reports_every_error() {
    let request: LiquidationRequest = serde_json::from_value(json!({
        "period": { "year": 2025, "month": 0, "days_worked": 45 },
        "income": { "bonuses": -10 },
        "deductions": { "advances": -5 }
    }))
    .unwrap();

    let errors = liquidate(&request, &LegalParameterStore::effective_defaults()).unwrap_err();
    assert_eq!(errors.len(), 5);
    assert_eq!(errors.errors()[0], ValidationError::MissingEmployee);
    assert!(errors.to_string().starts_with("5 validation error(s)"));
}

#[test]
fn test_result_serializes_to_integer_json() {
    let result = run(&simple_request(1_000_000));
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["net_pay"], json!(808_703));
    assert_eq!(value["previsional"]["health"], json!(70_000));
    assert_eq!(value["warnings"][0]["code"], json!("income_tax_bracket"));
}
