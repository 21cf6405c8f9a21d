use panel_core::ToastKind;

/// Transient operator notification surface.
pub trait Notifier {
    fn show(&self, message: &str, kind: ToastKind);
}

pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn show(&self, message: &str, kind: ToastKind) {
        println!("{}", format_toast(message, kind));
    }
}

pub fn format_toast(message: &str, kind: ToastKind) -> String {
    let marker = match kind {
        ToastKind::Success => "ok",
        ToastKind::Failure => "!!",
    };
    format!(">> [{marker}] {message}")
}
