//! Status tile reducer.
//!
//! `StatusTile::update` takes a host event or a finished fetch, mutates tile
//! state (settings, surface, phase) and returns effects for the runtime.
//! Every refresh cycle ends in `finish_refresh`, which is the single place a
//! failed cycle is logged and dropped.

mod effects;
mod request_id;

pub use effects::TileEffect;
pub use request_id::{LatestOnly, RequestId};

use crate::error::RefreshError;
use crate::pool::{DashboardResponse, PoolError};
use crate::protocol::{HostCommand, HostEvent, SettingsPayload, TileContext};
use crate::render::{RenderSurface, loading_frame, stats_frame};
use crate::settings::{PoolTarget, TileSettings};
use crate::stats::StatsSnapshot;

/// Input to the reducer.
#[derive(Debug)]
pub enum TileEvent {
    Host(HostEvent),
    /// A fetch started by `TileEffect::FetchStats` completed.
    StatsLoaded {
        req: RequestId,
        context: TileContext,
        result: Result<DashboardResponse, PoolError>,
    },
}

impl From<HostEvent> for TileEvent {
    fn from(event: HostEvent) -> Self {
        TileEvent::Host(event)
    }
}

/// `Idle` until the first appearance, then alternating `Loading`/`Rendered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TilePhase {
    #[default]
    Idle,
    Loading,
    Rendered,
}

#[derive(Debug, Default)]
pub struct StatusTile {
    settings: TileSettings,
    surface: Option<RenderSurface>,
    refresh: LatestOnly,
    phase: TilePhase,
}

impl StatusTile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings(&self) -> &TileSettings {
        &self.settings
    }

    pub fn surface(&self) -> Option<&RenderSurface> {
        self.surface.as_ref()
    }

    pub fn phase(&self) -> TilePhase {
        self.phase
    }

    pub fn update(&mut self, event: TileEvent) -> Vec<TileEffect> {
        match event {
            TileEvent::Host(event) => self.handle_host_event(event),
            TileEvent::StatsLoaded {
                req,
                context,
                result,
            } => self.handle_stats_loaded(req, context, result),
        }
    }

    fn handle_host_event(&mut self, event: HostEvent) -> Vec<TileEffect> {
        tracing::debug!(event = event.name(), "host event");
        match event {
            HostEvent::Connected => {
                tracing::info!("connected to host");
                Vec::new()
            }
            HostEvent::WillAppear { context, payload } => {
                self.on_became_visible(context, settings_from(payload))
            }
            HostEvent::KeyUp { context } => self.on_activated(context),
            HostEvent::DidReceiveSettings { context, payload } => {
                self.on_settings_changed(&context, settings_from(payload));
                Vec::new()
            }
            HostEvent::SendToPlugin { context, payload } => {
                tracing::debug!(%context, %payload, "message from settings UI");
                Vec::new()
            }
            HostEvent::PropertyInspectorDidAppear { context } => {
                tracing::debug!(%context, "settings UI opened");
                Vec::new()
            }
            HostEvent::PropertyInspectorDidDisappear { context } => {
                tracing::debug!(%context, "settings UI closed");
                Vec::new()
            }
        }
    }

    /// Stores settings, shows the placeholder and starts a refresh.
    fn on_became_visible(&mut self, context: TileContext, settings: TileSettings) -> Vec<TileEffect> {
        self.settings = settings;
        let Some(target) = self.settings.target() else {
            report(&context, &RefreshError::MissingConfiguration);
            return Vec::new();
        };

        let mut effects = vec![TileEffect::Host(HostCommand::ClearTitle {
            context: context.clone(),
        })];

        let surface = self.surface.get_or_insert_with(RenderSurface::new);
        loading_frame().draw(surface);
        match surface.to_data_uri() {
            Ok(image) => effects.push(TileEffect::Host(HostCommand::SetImage {
                context: context.clone(),
                image,
            })),
            Err(err) => report(&context, &RefreshError::Render(err)),
        }
        self.phase = TilePhase::Loading;

        effects.push(self.begin_refresh(context, target));
        effects
    }

    fn on_activated(&mut self, context: TileContext) -> Vec<TileEffect> {
        let Some(target) = self.settings.target() else {
            report(&context, &RefreshError::MissingConfiguration);
            return Vec::new();
        };
        vec![self.begin_refresh(context, target)]
    }

    fn on_settings_changed(&mut self, context: &TileContext, settings: TileSettings) {
        tracing::debug!(%context, configured = settings.target().is_some(), "settings updated");
        self.settings = settings;
    }

    fn begin_refresh(&mut self, context: TileContext, target: PoolTarget) -> TileEffect {
        let req = self.refresh.begin();
        tracing::debug!(%context, ?req, "refresh started");
        TileEffect::FetchStats {
            req,
            context,
            target,
        }
    }

    fn handle_stats_loaded(
        &mut self,
        req: RequestId,
        context: TileContext,
        result: Result<DashboardResponse, PoolError>,
    ) -> Vec<TileEffect> {
        if !self.refresh.take(req) {
            tracing::debug!(%context, ?req, "discarding stale refresh result");
            return Vec::new();
        }

        match self.finish_refresh(context.clone(), result) {
            Ok(effect) => vec![effect],
            Err(err) => {
                report(&context, &err);
                Vec::new()
            }
        }
    }

    /// Normalizes a dashboard and draws it. The surface is only touched once
    /// the response has been accepted and normalized.
    fn finish_refresh(
        &mut self,
        context: TileContext,
        result: Result<DashboardResponse, PoolError>,
    ) -> Result<TileEffect, RefreshError> {
        let response = result?;
        if !response.is_ok() {
            return Err(RefreshError::UpstreamNonSuccess {
                status: response.status,
            });
        }

        let stats = StatsSnapshot::from_dashboard(&response)?.formatted();
        let surface = self.surface.get_or_insert_with(RenderSurface::new);
        stats_frame(&stats).draw(surface);
        let image = surface.to_data_uri().map_err(RefreshError::Render)?;
        self.phase = TilePhase::Rendered;

        tracing::info!(
            %context,
            hashrate = %stats.hashrate,
            unpaid = %stats.unpaid,
            workers = %stats.workers,
            "tile rendered"
        );
        Ok(TileEffect::Host(HostCommand::SetImage { context, image }))
    }
}

fn settings_from(payload: Option<SettingsPayload>) -> TileSettings {
    payload
        .and_then(|payload| payload.settings)
        .unwrap_or_default()
}

fn report(context: &TileContext, err: &RefreshError) {
    if err.is_silent() {
        tracing::debug!(%context, "refresh skipped: {err}");
    } else {
        tracing::error!(%context, "refresh failed: {err}");
    }
}
