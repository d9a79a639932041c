//! Catalog transformation: catalog in, rendered chart document out.
//!
//! Systems are rendered independently. A system whose URLs are malformed or
//! whose downloads fail still appears in the output with `null` images, and
//! output order always matches catalog order.

use std::sync::Arc;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use tokio::fs;
use tracing::{debug, info, instrument, warn};

use cyclone_common::{
    png_url_for_page, Catalog, ChartKind, RenderedCatalog, RenderedSystem, StormSystem,
};

use crate::config::{ChartMode, PipelineConfig};
use crate::download::ChartDownloader;
use crate::fetch::ChartFetcher;

/// Reads the catalog, renders every system and writes the output document.
pub struct Pipeline {
    config: PipelineConfig,
    downloader: ChartDownloader,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, fetcher: Arc<dyn ChartFetcher>) -> Self {
        Self {
            config,
            downloader: ChartDownloader::new(fetcher),
        }
    }

    /// Run end to end. Only an unreadable catalog or an unwritable output
    /// is an error.
    pub async fn run(&self) -> Result<RenderedCatalog> {
        info!(path = %self.config.catalog_path.display(), "Reading WNP catalog");

        let catalog = Catalog::load(&self.config.catalog_path).with_context(|| {
            format!(
                "Failed to load catalog: {}",
                self.config.catalog_path.display()
            )
        })?;

        if catalog.systems.is_empty() {
            info!("No active systems, writing empty output");
        }

        let output = self.transform(&catalog).await;
        self.write_output(&output).await?;

        info!(
            path = %self.config.output_path.display(),
            systems = output.systems.len(),
            "Wrote output"
        );
        Ok(output)
    }

    /// Render every catalog system, preserving order.
    pub async fn transform(&self, catalog: &Catalog) -> RenderedCatalog {
        let mut output = RenderedCatalog::header_from(catalog);
        let basin = output.basin.clone();

        if self.config.mode == ChartMode::Download {
            let ids = catalog.systems.iter().map(RenderedSystem::resolve_id);
            for (dir, ids) in self.config.shared_chart_dirs(ids) {
                warn!(
                    dir = %dir.display(),
                    ids = ?ids,
                    "Systems share a chart directory; later downloads overwrite earlier ones"
                );
            }
        }

        output.systems = stream::iter(catalog.systems.iter())
            .map(|system| self.render_system(system, &basin))
            .buffered(self.config.max_concurrent.max(1))
            .collect()
            .await;

        output
    }

    #[instrument(skip_all, fields(id = %RenderedSystem::resolve_id(system)))]
    async fn render_system(&self, system: &StormSystem, default_basin: &str) -> RenderedSystem {
        let mut rendered = RenderedSystem::from_system(system, default_basin);

        if self.config.mode == ChartMode::Link {
            return rendered;
        }

        for kind in ChartKind::ALL {
            let image = match png_url_for_page(rendered.page(kind)) {
                None => {
                    debug!(chart = %kind, "No chart URL derived");
                    None
                }
                Some(url) if self.config.mode == ChartMode::Download => {
                    self.download_chart(&rendered.id, kind, &url).await
                }
                Some(url) => Some(url),
            };
            rendered.set_image(kind, image);
        }

        rendered
    }

    /// Download one chart and return the path the front-end should use.
    async fn download_chart(&self, system_id: &str, kind: ChartKind, url: &str) -> Option<String> {
        let target = self.config.chart_path(system_id, kind);
        self.downloader
            .download(url, &target)
            .await
            .map(|_| self.config.public_chart_path(system_id, kind))
    }

    /// Write the output document as 2-space indented JSON, replacing any
    /// previous file.
    pub async fn write_output(&self, output: &RenderedCatalog) -> Result<()> {
        let path = &self.config.output_path;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let json = output.to_pretty_json()?;
        fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write output: {}", path.display()))?;
        Ok(())
    }
}
