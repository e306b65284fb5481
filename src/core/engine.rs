use crate::core::{ModuleOutcome, ModuleSource, ModuleStatus, Pipeline, RunSummary};
use crate::utils::error::Result;
use chrono::Utc;

/// 逐一處理每個模組：load → inspect → assemble → emit。
/// 第一個失敗的模組會中止整個執行，後面的模組標記為 skipped。
pub struct AmalgamationEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> AmalgamationEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let mut summary = RunSummary::new(self.pipeline.mode());

        tracing::debug!("Discovering interface files...");
        let sources = self.pipeline.discover().await?;

        if sources.is_empty() {
            tracing::info!("No interface files found, nothing to do");
        } else {
            tracing::info!("🔍 Discovered {} module(s)", sources.len());
        }

        let mut remaining = sources.iter();
        while let Some(source) = remaining.next() {
            match self.process(source).await {
                Ok(outcome) => summary.outcomes.push(outcome),
                Err(e) => {
                    tracing::error!("❌ Module '{}' failed: {}", source.name, e);
                    summary.outcomes.push(ModuleOutcome::new(
                        source.name.clone(),
                        ModuleStatus::Failed {
                            category: e.category(),
                            message: e.to_string(),
                        },
                    ));
                    for skipped in remaining.by_ref() {
                        tracing::debug!("Skipping module '{}' after failure", skipped.name);
                        summary
                            .outcomes
                            .push(ModuleOutcome::new(skipped.name.clone(), ModuleStatus::Skipped));
                    }
                    summary.error = Some(e);
                }
            }
        }

        summary.finished_at = Utc::now();
        Ok(summary)
    }

    async fn process(&self, source: &ModuleSource) -> Result<ModuleOutcome> {
        tracing::debug!(
            "Loading module '{}' ({} + {})",
            source.name,
            source.interface_path.display(),
            source.implementation_path.display()
        );
        let module = self.pipeline.load(source).await?;

        let warnings = self.pipeline.inspect(&module)?;
        for warning in &warnings {
            tracing::warn!("⚠️ {}", warning);
        }

        let amalgamation = self.pipeline.assemble(&module);
        let status = self.pipeline.emit(&amalgamation).await?;

        match &status {
            ModuleStatus::Written { path, bytes } => {
                tracing::info!("📝 {} -> {} ({} bytes)", module.name, path.display(), bytes)
            }
            ModuleStatus::Planned { path, bytes } => {
                tracing::info!("📋 {} would write {} ({} bytes)", module.name, path.display(), bytes)
            }
            ModuleStatus::UpToDate { path } => {
                tracing::info!("✅ {} is up to date", path.display())
            }
            ModuleStatus::Failed { .. } | ModuleStatus::Skipped => {}
        }

        Ok(ModuleOutcome {
            name: module.name,
            status,
            warnings,
        })
    }
}
