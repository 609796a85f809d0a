//! Output formatting for CLI

use crate::evaluation::EvaluationResult;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print win/draw/loss counts and rates
pub fn print_evaluation(opponent: &str, result: &EvaluationResult) {
    print_subsection(&format!("Evaluation vs {opponent}"));
    print_kv("Games", &format_number(result.games));
    let line = |count: usize, rate: f64| format!("{} ({:.1}%)", format_number(count), rate * 100.0);
    print_kv("Wins", &line(result.wins, result.win_rate));
    print_kv("Draws", &line(result.draws, result.draw_rate));
    print_kv("Losses", &line(result.losses, result.loss_rate));
}
