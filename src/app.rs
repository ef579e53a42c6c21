use eframe::egui::{self, Align, Color32, Layout, RichText, Ui};
use eframe::{App, CreationContext, Frame};
use egui_extras::{Column, TableBuilder};

use crate::board::{Request, WorkoutBoard};
use crate::dispatch::Dispatcher;
use crate::error::DraftError;
use crate::models::Day;
use crate::view::{self, ListView};

const ACCENT: Color32 = Color32::from_rgb(5, 150, 105);
const DANGER: Color32 = Color32::from_rgb(220, 38, 38);
const BANNER_FILL: Color32 = Color32::from_rgb(254, 242, 242);
const BANNER_TEXT: Color32 = Color32::from_rgb(185, 28, 28);

pub struct WorkoutApp {
    board: WorkoutBoard,
    dispatcher: Dispatcher,
    draft_error: Option<DraftError>,
}

impl WorkoutApp {
    pub fn new(
        cc: &CreationContext,
        make_dispatcher: impl FnOnce(egui::Context) -> Dispatcher,
    ) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::new(16.0, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::new(30.0, egui::FontFamily::Proportional),
        );
        cc.egui_ctx.set_style(style);

        let dispatcher = make_dispatcher(cc.egui_ctx.clone());
        let mut board = WorkoutBoard::new();
        dispatcher.submit(board.start());

        WorkoutApp {
            board,
            dispatcher,
            draft_error: None,
        }
    }

    fn show_form(&mut self, ui: &mut Ui, requests: &mut Vec<Request>) {
        ui.group(|ui| {
            ui.horizontal_wrapped(|ui| {
                let form = &mut self.board.form;
                ui.add(
                    egui::TextEdit::singleline(&mut form.title)
                        .hint_text("Exercise (e.g., Squats)")
                        .desired_width(220.0),
                );
                ui.add(
                    egui::TextEdit::singleline(&mut form.sets)
                        .hint_text("Sets")
                        .desired_width(60.0),
                );
                ui.add(
                    egui::TextEdit::singleline(&mut form.reps)
                        .hint_text("Reps")
                        .desired_width(60.0),
                );
                day_picker(ui, "form_day", &mut form.day, "Day");
                ui.add(
                    egui::TextEdit::singleline(&mut form.notes)
                        .hint_text("Notes")
                        .desired_width(220.0),
                );
            });

            ui.horizontal(|ui| {
                let ready = !self.board.form.title.trim().is_empty();
                let add = ui.add_enabled(
                    ready,
                    egui::Button::new(RichText::new("Add Workout").strong().color(Color32::WHITE))
                        .fill(ACCENT),
                );
                if add.clicked() {
                    match self.board.begin_create() {
                        Ok(request) => {
                            self.draft_error = None;
                            requests.push(request);
                        }
                        Err(err) => self.draft_error = Some(err),
                    }
                }
                if let Some(err) = &self.draft_error {
                    ui.colored_label(DANGER, err.to_string());
                }
            });
        });
    }

    fn show_filter(&mut self, ui: &mut Ui, requests: &mut Vec<Request>) {
        let mut selected = self.board.filter_day;
        ui.horizontal(|ui| {
            ui.label(RichText::new("Filter by day:").color(ACCENT));
            day_picker(ui, "filter_day", &mut selected, "All");
            if ui.button("Today").clicked() {
                selected = Some(Day::today());
            }
        });
        if let Some(request) = self.board.set_filter(selected) {
            requests.push(request);
        }
    }

    fn show_error(&self, ui: &mut Ui) {
        if !self.board.has_error() {
            return;
        }
        egui::Frame::group(ui.style())
            .fill(BANNER_FILL)
            .stroke(egui::Stroke::new(1.0, Color32::from_rgb(254, 202, 202)))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.colored_label(BANNER_TEXT, &self.board.error);
            });
    }

    fn show_list(&self, ui: &mut Ui, requests: &mut Vec<Request>) {
        let workouts = match view::list_view(&self.board) {
            ListView::Loading => {
                ui.label(RichText::new(view::LOADING_MESSAGE).color(ACCENT));
                return;
            }
            ListView::Empty => {
                ui.label(RichText::new(view::EMPTY_MESSAGE).color(ACCENT));
                return;
            }
            ListView::Items(workouts) => workouts,
        };

        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .column(Column::exact(28.0))
            .column(Column::remainder())
            .column(Column::auto())
            .body(|mut body| {
                for workout in workouts {
                    let notes = view::notes_line(workout);
                    let height = if notes.is_some() { 72.0 } else { 52.0 };
                    body.row(height, |mut row| {
                        row.col(|ui| {
                            // Only the server's answer changes the row.
                            let mut checked = workout.completed;
                            if ui.checkbox(&mut checked, "").changed() {
                                let toggle =
                                    self.board.begin_toggle(&workout.id, workout.completed);
                                requests.push(toggle);
                            }
                        });
                        row.col(|ui| {
                            ui.vertical(|ui| {
                                let mut title = RichText::new(&workout.title).strong();
                                if workout.completed {
                                    title = title.strikethrough();
                                }
                                ui.label(title);
                                let summary = view::summary_line(workout);
                                if !summary.is_empty() {
                                    ui.label(RichText::new(summary).small());
                                }
                                if let Some(notes) = notes {
                                    ui.label(RichText::new(notes).small().italics());
                                }
                            });
                        });
                        row.col(|ui| {
                            if ui.button(RichText::new("Delete").color(DANGER)).clicked() {
                                requests.push(self.board.begin_remove(&workout.id));
                            }
                        });
                    });
                }
            });
    }
}

fn day_picker(ui: &mut Ui, id: &str, value: &mut Option<Day>, none_label: &str) {
    let selected_text = value.map_or(none_label.to_string(), |day| day.to_string());
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            ui.selectable_value(value, None, none_label);
            for day in Day::ALL {
                ui.selectable_value(value, Some(day), day.as_str());
            }
        });
}

impl App for WorkoutApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        for outcome in self.dispatcher.drain() {
            self.board.apply(outcome);
        }

        let mut requests = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(RichText::new(view::TITLE).heading().strong().color(ACCENT));
            ui.label(view::TAGLINE);
            ui.add_space(16.0);

            self.show_form(ui, &mut requests);
            ui.add_space(12.0);
            self.show_filter(ui, &mut requests);
            ui.add_space(8.0);
            self.show_error(ui);
            ui.add_space(8.0);
            self.show_list(ui, &mut requests);
        });

        for request in requests {
            self.dispatcher.submit(request);
        }
    }
}
