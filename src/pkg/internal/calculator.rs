use serde::{Deserialize, Serialize};

const ERROR: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
}

impl Operation {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "*",
            Operation::Divide => "/",
        }
    }

    fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operation::Add => lhs + rhs,
            Operation::Subtract => lhs - rhs,
            Operation::Multiply => lhs * rhs,
            Operation::Divide => lhs / rhs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(char),
    Point,
    Op(Operation),
    Compute,
    Delete,
    Clear,
}

impl Key {
    /// Accepts keyboard names as well as the widget's button actions.
    pub fn parse(raw: &str) -> Option<Key> {
        let key = match raw {
            "." => Key::Point,
            "+" => Key::Op(Operation::Add),
            "-" => Key::Op(Operation::Subtract),
            "*" | "x" => Key::Op(Operation::Multiply),
            "/" | "%" => Key::Op(Operation::Divide),
            "Enter" | "=" | "calculate" => Key::Compute,
            "Backspace" | "delete" => Key::Delete,
            "Escape" | "clear" => Key::Clear,
            d if d.len() == 1 && d.chars().all(|c| c.is_ascii_digit()) => {
                Key::Digit(d.chars().next()?)
            }
            _ => return None,
        };
        Some(key)
    }
}

/// Two-operand calculator: an operand being typed, an optional pending
/// operation and the operand it applies to.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    current: String,
    previous: String,
    operation: Option<Operation>,
}

impl Default for Calculator {
    fn default() -> Self {
        Calculator {
            current: "0".into(),
            previous: String::new(),
            operation: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Screen {
    pub current: String,
    pub previous: String,
}

#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub current: String,
    pub previous: String,
    pub operation: Option<Operation>,
    pub display: Screen,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn previous(&self) -> &str {
        &self.previous
    }

    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn delete(&mut self) {
        if self.current == "0" {
            return;
        }
        if self.current == ERROR {
            self.current = "0".into();
            return;
        }
        self.current.pop();
        if self.current.is_empty() || self.current == "-" {
            self.current = "0".into();
        }
    }

    pub fn append(&mut self, key: Key) {
        match key {
            Key::Point if self.current.contains('.') => {}
            Key::Point if self.current == ERROR => self.current = "0.".into(),
            Key::Point => self.current.push('.'),
            Key::Digit(d) if self.current == "0" || self.current == ERROR => {
                self.current = d.to_string()
            }
            Key::Digit(d) => self.current.push(d),
            _ => {}
        }
    }

    pub fn choose_operation(&mut self, op: Operation) {
        if self.current.is_empty() {
            return;
        }
        if !self.previous.is_empty() {
            self.compute();
        }
        self.operation = Some(op);
        self.previous = std::mem::replace(&mut self.current, "0".into());
    }

    pub fn compute(&mut self) {
        let (Some(lhs), Some(rhs)) =
            (parse_operand(&self.previous), parse_operand(&self.current))
        else {
            return;
        };
        let Some(op) = self.operation else {
            return;
        };
        let value = op.apply(lhs, rhs);
        self.current = if value.is_finite() {
            format_number(value)
        } else {
            tracing::debug!("{} {} {} is not finite", lhs, op.symbol(), rhs);
            ERROR.into()
        };
        self.operation = None;
        self.previous.clear();
    }

    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(_) | Key::Point => self.append(key),
            Key::Op(op) => self.choose_operation(op),
            Key::Compute => self.compute(),
            Key::Delete => self.delete(),
            Key::Clear => self.clear(),
        }
    }

    /// Feeds raw key names in order; returns the ones that were not understood.
    pub fn press_all<'k, I>(&mut self, keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'k str>,
    {
        let mut ignored = vec![];
        for raw in keys {
            match Key::parse(raw) {
                Some(key) => self.press(key),
                None => ignored.push(raw.to_string()),
            }
        }
        ignored
    }

    pub fn screen(&self) -> Screen {
        let previous = match self.operation {
            Some(op) => format!("{} {}", display_number(&self.previous), op.symbol()),
            None => String::new(),
        };
        Screen {
            current: display_number(&self.current),
            previous,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current: self.current.clone(),
            previous: self.previous.clone(),
            operation: self.operation,
            display: self.screen(),
        }
    }
}

fn parse_operand(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".into()
    } else {
        value.to_string()
    }
}

/// Groups the integer part with commas and keeps typed fraction digits as-is,
/// so a trailing `.` or `0` survives while an operand is being entered.
pub fn display_number(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let (int_part, fraction) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw, None),
    };
    let (negative, digits) = match int_part.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, int_part),
    };
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return raw.to_string();
    }
    let trimmed = digits.trim_start_matches('0');
    let trimmed = if trimmed.is_empty() { "0" } else { trimmed };
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(trimmed));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
