pub mod widgets;

use eframe::egui::{self, Align2};
use eframe::NativeOptions;
use geobox::{BoundingBox, Coordinate};
use geocoding::{NominatimClient, NominatimConfig, resolve_address};
use sightings::{
    AnimalDirectory, AtlasClient, AtlasConfig, SightingsError, run_query,
};
use tracing::info;
use widgets::MapView;

// initial view, roughly a city-wide zoom over Brisbane
const HOME: (f64, f64) = (153.0260, -27.4705);
const HOME_SPAN: f64 = 0.5;
const MARKER_SPAN: f64 = 0.03;

fn main() -> eframe::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().init();

    eframe::run_native(
        "Animal Lookup",
        NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 600.0]),
            ..Default::default()
        },
        Box::new(|_cc| Ok(Box::new(App::new()?))),
    )
}

struct Modal {
    title: String,
    text: String,
}

impl Modal {
    fn new(title: &str, text: impl Into<String>) -> Modal {
        Modal {
            title: title.to_owned(),
            text: text.into(),
        }
    }
}

struct App {
    atlas: AtlasClient,
    geocoder: NominatimClient,

    street: String,
    city: String,
    state: String,
    country: String,

    year_start: String,
    year_end: String,
    longitude: String,
    latitude: String,
    radius: String,

    /// Replaced wholesale on every successful search.
    directory: AnimalDirectory,
    marker: Option<Coordinate>,
    bbox: Option<BoundingBox>,
    view_center: Coordinate,
    view_span: f64,
    modal: Option<Modal>,
}

impl App {
    fn new() -> Result<App, Box<dyn std::error::Error + Send + Sync>> {
        let atlas = AtlasClient::new(AtlasConfig::from_env())?;
        let geocoder = NominatimClient::new(NominatimConfig::from_env())?;
        let view_center = Coordinate::new(HOME.0, HOME.1)?;
        info!("clients initialized");

        Ok(App {
            atlas,
            geocoder,
            street: String::new(),
            city: String::new(),
            state: String::new(),
            country: String::new(),
            year_start: String::new(),
            year_end: String::new(),
            longitude: String::new(),
            latitude: String::new(),
            radius: String::new(),
            directory: AnimalDirectory::default(),
            marker: None,
            bbox: None,
            view_center,
            view_span: HOME_SPAN,
            modal: None,
        })
    }

    /// Blocks the UI thread until the geocoder answers, like every other
    /// user action. One marker at a time: a previous marker is dropped
    /// before the new one is placed.
    fn on_geocode(&mut self) {
        match resolve_address(
            &self.geocoder,
            &self.street,
            &self.city,
            &self.state,
            &self.country,
        ) {
            Ok(Some(coord)) => {
                self.longitude = coord.lon().to_string();
                self.latitude = coord.lat().to_string();
                self.marker = Some(coord);
                self.view_center = coord;
                self.view_span = MARKER_SPAN;
                self.modal = Some(Modal::new(
                    "Success",
                    format!("Address found: ({}, {})", coord.lat(), coord.lon()),
                ));
            }
            Ok(None) => {
                self.modal = Some(Modal::new("No Match", "Address not found."));
            }
            Err(err) => {
                self.modal = Some(Modal::new("Geocoding Error", err.to_string()));
            }
        }
    }

    fn on_search(&mut self) {
        let (center, radius, year_start, year_end) = match self.parse_query() {
            Ok(parsed) => parsed,
            Err(text) => {
                self.modal = Some(Modal::new("Invalid Input", text));
                return;
            }
        };

        match run_query(&self.atlas, center, radius, year_start, year_end) {
            Ok(table) => match AnimalDirectory::from_table(&table) {
                Ok(directory) => {
                    info!(rows = table.len(), animals = directory.len(), "search finished");
                    self.directory = directory;
                    // around() already succeeded inside run_query
                    self.bbox = BoundingBox::around(center, radius).ok();
                    self.view_center = center;
                    self.view_span = (radius / geobox::METERS_PER_DEGREE * 6.0).max(MARKER_SPAN);
                }
                Err(err @ SightingsError::MissingColumn(_)) => {
                    self.modal = Some(Modal::new("No Results", err.to_string()));
                }
                Err(err) => {
                    self.modal = Some(Modal::new("Search Error", err.to_string()));
                }
            },
            Err(SightingsError::Geo(err)) => {
                self.modal = Some(Modal::new("Invalid Input", err.to_string()));
            }
            Err(err) => {
                self.modal = Some(Modal::new("Search Error", err.to_string()));
            }
        }
    }

    fn parse_query(&self) -> Result<(Coordinate, f64, i32, i32), String> {
        let year_start: i32 = self
            .year_start
            .trim()
            .parse()
            .map_err(|_| "Year Start must be a whole number.".to_owned())?;
        let year_end: i32 = self
            .year_end
            .trim()
            .parse()
            .map_err(|_| "Year End must be a whole number.".to_owned())?;
        let longitude: f64 = self
            .longitude
            .trim()
            .parse()
            .map_err(|_| "Longitude must be a number.".to_owned())?;
        let latitude: f64 = self
            .latitude
            .trim()
            .parse()
            .map_err(|_| "Latitude must be a number.".to_owned())?;
        let radius: f64 = self
            .radius
            .trim()
            .parse()
            .map_err(|_| "Radius must be a number of meters.".to_owned())?;
        let center = Coordinate::new(longitude, latitude).map_err(|err| err.to_string())?;
        Ok((center, radius, year_start, year_end))
    }

    fn address_section(&mut self, ui: &mut egui::Ui) {
        ui.heading("Address");
        egui::Grid::new("address").num_columns(2).show(ui, |ui| {
            ui.label("Street Address:");
            ui.text_edit_singleline(&mut self.street);
            ui.end_row();
            ui.label("City:");
            ui.text_edit_singleline(&mut self.city);
            ui.end_row();
            ui.label("State:");
            ui.text_edit_singleline(&mut self.state);
            ui.end_row();
            ui.label("Country:");
            ui.text_edit_singleline(&mut self.country);
            ui.end_row();
        });
        if ui.button("Get Coordinates").clicked() {
            self.on_geocode();
        }
    }

    fn filter_section(&mut self, ui: &mut egui::Ui) {
        ui.heading("Filters");
        egui::Grid::new("filters").num_columns(2).show(ui, |ui| {
            ui.label("Year Start:");
            ui.text_edit_singleline(&mut self.year_start);
            ui.end_row();
            ui.label("Year End:");
            ui.text_edit_singleline(&mut self.year_end);
            ui.end_row();
            ui.label("Longitude:");
            ui.text_edit_singleline(&mut self.longitude);
            ui.end_row();
            ui.label("Latitude:");
            ui.text_edit_singleline(&mut self.latitude);
            ui.end_row();
            ui.label("Radius (meters):");
            ui.text_edit_singleline(&mut self.radius);
            ui.end_row();
        });
        if ui.button("Search").clicked() {
            self.on_search();
        }
    }

    fn results_section(&mut self, ui: &mut egui::Ui) {
        ui.heading("Animal Names");
        let names: Vec<String> = self.directory.names().map(str::to_owned).collect();
        let mut activated: Option<String> = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for name in &names {
                    if ui.selectable_label(false, name).double_clicked() {
                        activated = Some(name.clone());
                    }
                }
            });
        if let Some(name) = activated {
            match self.directory.url(&name) {
                Some(url) => ui.ctx().open_url(egui::OpenUrl::new_tab(url)),
                None => self.modal = Some(Modal::new("No URL", "No URL available for this animal.")),
            }
        }
    }

    fn modal_section(&mut self, ctx: &egui::Context) {
        let mut dismissed = false;
        if let Some(modal) = &self.modal {
            egui::Window::new(&modal.title)
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(&modal.text);
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
        }
        if dismissed {
            self.modal = None;
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        egui::SidePanel::left("controls")
            .min_width(320.0)
            .show(ctx, |ui| {
                self.address_section(ui);
                ui.separator();
                self.filter_section(ui);
                ui.separator();
                self.results_section(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Map View");
            ui.add(MapView {
                view_center: self.view_center,
                view_span: self.view_span,
                marker: self.marker,
                bbox: self.bbox,
            });
        });

        self.modal_section(ctx);
    }
}
