//! Completion report printer.

use call_python::step::STEP_NAME;
use call_python::CompletionSignal;
use owo_colors::OwoColorize;

pub struct TextPrinter {
    pub color: bool,
}

impl TextPrinter {
    pub fn print(&self, signal: CompletionSignal) {
        println!("{}", self.render(signal));
    }

    pub fn render(&self, signal: CompletionSignal) -> String {
        let text = format!("{}: {} (exit {})", STEP_NAME, signal, signal.exit_index());
        if !self.color {
            return text;
        }
        match signal {
            CompletionSignal::Success => text.green().to_string(),
            CompletionSignal::Failure => text.red().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain() {
        let printer = TextPrinter { color: false };
        assert_eq!(printer.render(CompletionSignal::Success), "CallPython: success (exit 0)");
    }

    #[test]
    fn test_render_colored_keeps_text() {
        let printer = TextPrinter { color: true };
        let out = printer.render(CompletionSignal::Success);
        assert!(out.contains("CallPython: success (exit 0)"));
        assert_ne!(out, "CallPython: success (exit 0)");
    }
}
