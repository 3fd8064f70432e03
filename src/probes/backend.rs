//! GUI version declared by the installed backend module.

use tracing::debug;

use super::status::Presence;
use crate::package_manager::Pip;

/// Reads an optional version attribute from the backend module.
#[derive(Debug, Clone)]
pub struct DeclaredVersionProbe {
    pip: Pip,
    module: String,
    attribute: String,
}

impl DeclaredVersionProbe {
    /// Create a probe reading `module.attribute` with the interpreter behind `pip`.
    pub fn new(pip: Pip, module: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            pip,
            module: module.into(),
            attribute: attribute.into(),
        }
    }

    fn snippet(&self) -> String {
        format!(
            "import importlib; m = importlib.import_module({:?}); v = getattr(m, {:?}, None); print('' if v is None else v)",
            self.module, self.attribute
        )
    }

    /// `Present` with the declared version, `Absent` when the module lacks
    /// the attribute, `Unknown` when the module cannot be imported.
    pub fn probe(&self) -> Presence<String> {
        let result = match self.pip.run_snippet(&self.snippet()) {
            Ok(result) => result,
            Err(e) => return Presence::Unknown(format!("could not run interpreter: {}", e)),
        };

        if !result.success {
            let reason = result
                .stderr
                .lines()
                .rev()
                .find(|l| !l.trim().is_empty())
                .unwrap_or("import failed")
                .trim()
                .to_string();
            debug!("Importing {} failed: {}", self.module, reason);
            return Presence::Unknown(reason);
        }

        match result.stdout.trim() {
            "" => Presence::Absent,
            version => Presence::Present(version.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{ScriptedResponse, ScriptedRunner};
    use std::sync::Arc;

    fn probe_with(response: ScriptedResponse) -> Presence<String> {
        let runner = Arc::new(ScriptedRunner::new());
        runner.on("import_module", response);
        DeclaredVersionProbe::new(Pip::new("python3", runner), "pyvol", "__guiversion__").probe()
    }

    #[test]
    fn declared_version_is_present() {
        assert_eq!(
            probe_with(ScriptedResponse::ok("1.1.0\n")),
            Presence::Present("1.1.0".into())
        );
    }

    #[test]
    fn missing_attribute_is_absent() {
        assert_eq!(probe_with(ScriptedResponse::ok("\n")), Presence::Absent);
    }

    #[test]
    fn import_failure_is_unknown() {
        let presence = probe_with(ScriptedResponse::fail(
            1,
            "Traceback (most recent call last):\nModuleNotFoundError: No module named 'pyvol'\n",
        ));
        assert_eq!(
            presence,
            Presence::Unknown("ModuleNotFoundError: No module named 'pyvol'".into())
        );
    }

    #[test]
    fn spawn_error_is_unknown() {
        assert!(probe_with(ScriptedResponse::spawn_error("not found")).is_unknown());
    }

    #[test]
    fn snippet_names_module_and_attribute() {
        let runner = Arc::new(ScriptedRunner::new());
        let probe = DeclaredVersionProbe::new(Pip::new("python3", runner), "pyvol", "__guiversion__");
        let code = probe.snippet();
        assert!(code.contains("import_module(\"pyvol\")"));
        assert!(code.contains("\"__guiversion__\""));
    }
}
