//! TSP Tour Collector.
//!
//! Sammelt von Hand gezeichnete TSP-Touren: lädt Probleme vom Backend,
//! nimmt Klicks entgegen und reicht vollständige Touren ein.

use eframe::egui;
use std::time::Instant;
use tsp_tour_collector::{
    render, ui, AppController, AppIntent, AppOptions, AppState, HttpTransport, NetworkWorker,
};

fn main() -> Result<(), eframe::Error> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> Result<(), eframe::Error> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("TSP Tour Collector v{} startet...", env!("CARGO_PKG_VERSION"));

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1100.0, 1150.0])
                .with_title("TSP Tour Collector"),
            renderer: eframe::Renderer::Glow,
            ..Default::default()
        };

        eframe::run_native(
            "TSP Tour Collector",
            options,
            Box::new(|_cc| Ok(Box::new(CollectorApp::new()?))),
        )
    }
}

/// Haupt-Anwendungsstruktur
struct CollectorApp {
    state: AppState,
    controller: AppController,
    renderer: render::Renderer,
    worker: NetworkWorker,
}

impl CollectorApp {
    fn new() -> anyhow::Result<Self> {
        // Optionen aus TOML laden (oder Standardwerte)
        let config_path = AppOptions::config_path();
        let app_options = AppOptions::load_from_file(&config_path);

        let transport = HttpTransport::new(app_options.server_url.clone())?;
        log::info!("Backend: {}", transport.base_url());
        let worker = NetworkWorker::spawn(transport)?;

        let state = AppState::with_options(app_options)
            .with_prompt(Box::new(ui::RfdPrompt::new("TSP Tour Collector")));

        let mut app = Self {
            state,
            controller: AppController::new(),
            renderer: render::Renderer::new(),
            worker,
        };
        app.process_events(vec![AppIntent::SessionStartRequested]);
        Ok(app)
    }
}

impl eframe::App for CollectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.should_exit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let mut events = self.collect_ui_events(ctx);
        events.extend(self.collect_system_events(ctx));

        let has_meaningful_events = !events.is_empty();

        self.process_events(events);

        self.poll_network();

        self.maybe_request_repaint(ctx, has_meaningful_events);
    }
}

impl CollectorApp {
    fn collect_ui_events(&mut self, ctx: &egui::Context) -> Vec<AppIntent> {
        let mut events = Vec::new();

        events.extend(ui::render_toolbar(ctx, &self.state));
        ui::render_status_bar(ctx, &self.state);
        events.extend(ui::render_canvas(
            ctx,
            &self.state,
            &self.controller,
            &self.renderer,
        ));

        events
    }

    fn collect_system_events(&mut self, ctx: &egui::Context) -> Vec<AppIntent> {
        let mut events = Vec::new();

        // Unload-Guard: Schließen abfangen und über den Controller entscheiden
        if ctx.input(|i| i.viewport().close_requested()) && !self.state.should_exit {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            events.push(AppIntent::CloseRequested);
        }

        if self.state.ui.completion_notice_due(Instant::now()) {
            events.push(AppIntent::CompletionNoticeDue);
        }

        events
    }

    fn process_events(&mut self, events: Vec<AppIntent>) {
        for event in events {
            if let Err(e) = self.controller.handle_intent(&mut self.state, event) {
                log::error!("Event handling failed: {:#}", e);
            }
        }
        if let Err(e) = self.controller.flush_outbox(&mut self.state, &self.worker) {
            log::error!("Request konnte nicht gesendet werden: {:#}", e);
        }
    }

    fn poll_network(&mut self) {
        match self.controller.poll_worker(&mut self.state, &self.worker) {
            Ok(0) => {}
            Ok(_) => {
                if let Err(e) = self.controller.flush_outbox(&mut self.state, &self.worker) {
                    log::error!("Request konnte nicht gesendet werden: {:#}", e);
                }
            }
            Err(e) => log::error!("Antwort-Verarbeitung fehlgeschlagen: {:#}", e),
        }
    }

    fn maybe_request_repaint(&self, ctx: &egui::Context, has_meaningful_events: bool) {
        if has_meaningful_events || self.state.should_exit {
            ctx.request_repaint();
        } else if self.state.request_in_flight() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        } else if self.state.ui.completion_notice_at.is_some() {
            ctx.request_repaint_after(tsp_tour_collector::app::state::COMPLETION_NOTICE_DELAY);
        }
    }
}
