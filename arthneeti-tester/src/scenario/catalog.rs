use super::Scenario;
use super::full_game::FullGameScenario;
use super::lifeline::LifelineScenario;
use super::market::MarketScenario;
use super::resume::ResumeScenario;
use super::smoke::SmokeScenario;

fn all_scenarios() -> Vec<Box<dyn Scenario>> {
    vec![
        Box::new(SmokeScenario),
        Box::new(ResumeScenario),
        Box::new(FullGameScenario),
        Box::new(MarketScenario),
        Box::new(LifelineScenario),
    ]
}

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    all_scenarios()
        .iter()
        .map(|s| (s.key(), s.description()))
        .collect()
}

#[must_use]
pub fn scenario_keys() -> Vec<&'static str> {
    all_scenarios().iter().map(|s| s.key()).collect()
}

#[must_use]
pub fn get_scenario(key: &str) -> Option<Box<dyn Scenario>> {
    all_scenarios().into_iter().find(|s| s.key() == key)
}
