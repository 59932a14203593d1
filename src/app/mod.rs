pub mod commands;
pub mod view;

use crate::adapters::{NominatimClient, TransportRestClient};
use crate::core::map_view::MapView;
use crate::core::session::MapSession;
use crate::domain::model::Position;
use crate::domain::ports::{ConfigProvider, ReverseGeocoder, StopsProvider};
use crate::utils::error::Result;
use commands::Command;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use view::{render_json, render_text, MapSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// The map widget: a viewport plus a session fed by the two services.
pub struct MobilityMap {
    view: MapView,
    session: MapSession,
    format: OutputFormat,
}

impl MobilityMap {
    pub fn new(
        view: MapView,
        stops_provider: Arc<dyn StopsProvider>,
        geocoder: Arc<dyn ReverseGeocoder>,
        format: OutputFormat,
    ) -> Self {
        Self {
            view,
            session: MapSession::new(stops_provider, geocoder),
            format,
        }
    }

    /// Wires the transport.rest and Nominatim clients from configuration.
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C, format: OutputFormat) -> Result<Self> {
        let stops = TransportRestClient::from_config(config)?;
        let geocoder = NominatimClient::from_config(config)?;
        Ok(Self::new(
            MapView::from_config(config),
            Arc::new(stops),
            Arc::new(geocoder),
            format,
        ))
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    pub fn session(&self) -> &MapSession {
        &self.session
    }

    /// The map finished loading: select `position`, or the center when none
    /// is given, and wait for both lookups.
    pub async fn load(&self, position: Option<Position>) {
        let position = position.unwrap_or(self.view.center);
        tracing::info!("🗺️ Map loaded at zoom {} ({})", self.view.zoom, self.view.style_url);
        self.session.select_position(position);
        self.session.wait_idle().await;
    }

    pub async fn click(&self, position: Position) {
        self.session.select_position(position);
        self.session.wait_idle().await;
    }

    pub fn render(&self) -> Result<String> {
        let state = self.session.snapshot();
        let snapshot = MapSnapshot::new(&self.view, &state);
        match self.format {
            OutputFormat::Text => Ok(render_text(&snapshot)),
            OutputFormat::Json => render_json(&snapshot),
        }
    }

    /// Applies one command. Returns `false` once the user asked to quit.
    pub async fn handle<W: Write>(&self, command: Command, out: &mut W) -> Result<bool> {
        match command {
            Command::Quit => return Ok(false),
            Command::Click(position) => self.click(position).await,
            Command::SelectStop(id) => {
                if !self.session.select_stop(&id) {
                    writeln!(out, "Unbekannte Haltestelle: {}", id)?;
                    return Ok(true);
                }
            }
            Command::Close => self.session.close_sidebar(),
            Command::List => {}
        }
        writeln!(out, "{}", self.render()?)?;
        Ok(true)
    }

    /// Reads commands line by line until `quit` or end of input.
    pub async fn run_interactive<R, W>(&self, reader: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(command) => {
                    if !self.handle(command, out).await? {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!("Rejected input {:?}: {}", line, e);
                    writeln!(out, "❌ {}", e.user_friendly_message())?;
                    writeln!(out, "💡 {}", e.recovery_suggestion())?;
                }
            }
            out.flush()?;
        }
        Ok(())
    }

    pub fn shutdown(&self) {
        self.session.shutdown();
    }
}
