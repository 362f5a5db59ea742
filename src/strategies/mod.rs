pub mod evaluator;
pub mod rules;

pub use evaluator::{evaluate_bar, evaluate_strategies, StrategyEvaluation};
pub use rules::{rule_table, EvalContext, LevelRule, StrategyRules};
