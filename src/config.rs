use crate::validation::Severity;

/// Controls the optional behaviour of an [`crate::ObjectLifetimes`] layer.
#[derive(Clone, Debug)]
pub struct LayerConfig {
    leak_reports: bool,
    leak_severity: Severity,
    overwrite_warnings: bool,
}

impl LayerConfig {
    pub fn new() -> Self {
        Self {
            leak_reports: true,
            leak_severity: Severity::Fatal,
            overwrite_warnings: true,
        }
    }

    /// Objects left alive at instance or device destruction are still cleared but no longer
    /// reported.
    pub fn disable_leak_reports(&mut self) {
        self.leak_reports = false;
    }

    pub fn set_leak_severity(&mut self, severity: Severity) {
        self.leak_severity = severity;
    }

    /// Silences the warning logged when a create call returns a handle that is still live.
    pub fn disable_overwrite_warnings(&mut self) {
        self.overwrite_warnings = false;
    }

    pub fn reports_leaks(&self) -> bool {
        self.leak_reports
    }

    pub fn get_leak_severity(&self) -> Severity {
        self.leak_severity
    }

    pub fn warns_on_overwrite(&self) -> bool {
        self.overwrite_warnings
    }
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self::new()
    }
}
