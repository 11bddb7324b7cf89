use crate::pkg::internal::calculator::{Calculator, Key};

/// Arguments that are a key name on their own (`Backspace`, `Enter`, `7`) are
/// kept whole; anything else is split into single-character keys.
fn expand(args: &[String]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| match Key::parse(arg) {
            Some(_) => vec![arg.clone()],
            None => arg.chars().map(String::from).collect(),
        })
        .collect()
}

pub fn run(args: &[String]) {
    let keys = expand(args);
    let mut calc = Calculator::new();
    let ignored = calc.press_all(keys.iter().map(String::as_str));
    if !ignored.is_empty() {
        tracing::warn!("ignored keys: {:?}", ignored);
    }
    let screen = calc.screen();
    if !screen.previous.is_empty() {
        println!("{}", screen.previous);
    }
    println!("{}", screen.current);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_splits_expressions_but_keeps_named_keys() {
        let args = vec!["12+7=".to_string(), "Backspace".to_string(), "x".to_string()];
        assert_eq!(expand(&args), vec!["1", "2", "+", "7", "=", "Backspace", "x"]);
    }

    #[test]
    fn test_expanded_keys_drive_the_calculator() {
        let keys = expand(&["1500/4=".to_string()]);
        let mut calc = Calculator::new();
        assert!(calc.press_all(keys.iter().map(String::as_str)).is_empty());
        assert_eq!(calc.screen().current, "375");
    }
}
