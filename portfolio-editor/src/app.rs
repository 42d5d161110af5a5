use egui::{Align, Color32, Layout, RichText, ScrollArea, TextEdit, Ui};
use egui_reorder::{DragDropUi, Handle};
use tracing::{debug, info};

use crate::dialog::{DialogOutcome, EditDialog, EntryForm};
use crate::model::{remove_entry, save_entry, EducationItem, ExperienceItem, PortfolioData};

/// What the user clicked on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardAction {
    Edit(usize),
    Delete(usize),
}

pub struct PortfolioApp {
    portfolio: PortfolioData,
    load_error: Option<String>,
    editing_personal_info: bool,
    experience_list: DragDropUi,
    education_list: DragDropUi,
    experience_dialog: Option<EditDialog<ExperienceItem>>,
    education_dialog: Option<EditDialog<EducationItem>>,
}

impl PortfolioApp {
    pub fn new(portfolio: PortfolioData, load_error: Option<String>) -> Self {
        Self {
            portfolio,
            load_error,
            editing_personal_info: false,
            experience_list: DragDropUi::new("experiences"),
            education_list: DragDropUi::new("education"),
            experience_dialog: None,
            education_dialog: None,
        }
    }

    fn personal_info_section(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.heading("Personal Information");
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let label = if self.editing_personal_info { "Preview" } else { "Edit" };
                if ui.button(label).clicked() {
                    self.editing_personal_info = !self.editing_personal_info;
                }
            });
        });

        let info = &mut self.portfolio.personal_info;
        if self.editing_personal_info {
            ui.label("Name");
            ui.text_edit_singleline(&mut info.name);
            ui.label("Title");
            ui.text_edit_singleline(&mut info.title);
            ui.label("About");
            ui.add(
                TextEdit::multiline(&mut info.about)
                    .desired_rows(4)
                    .desired_width(f32::INFINITY),
            );
        } else {
            ui.label(RichText::new(&info.name).size(20.0).strong());
            ui.label(RichText::new(&info.title).weak());
            ui.label(&info.about);
        }
    }

    fn dialog_open(&self) -> bool {
        self.experience_dialog.is_some() || self.education_dialog.is_some()
    }

    fn experience_section(&mut self, ui: &mut Ui) -> SectionEvents<ExperienceItem> {
        let mut events = SectionEvents {
            add: section_header(ui, "Experience", "Add Experience"),
            ..SectionEvents::default()
        };
        events.reordered = self
            .experience_list
            .ui(ui, &self.portfolio.experiences, |ui, handle, index, item| {
                if let Some(action) = experience_card(ui, handle, index, item) {
                    events.action = Some(action);
                }
            })
            .completed();
        events
    }

    fn education_section(&mut self, ui: &mut Ui) -> SectionEvents<EducationItem> {
        let mut events = SectionEvents {
            add: section_header(ui, "Education", "Add Education"),
            ..SectionEvents::default()
        };
        events.reordered = self
            .education_list
            .ui(ui, &self.portfolio.education, |ui, handle, index, item| {
                if let Some(action) = education_card(ui, handle, index, item) {
                    events.action = Some(action);
                }
            })
            .completed();
        events
    }

    fn apply_experience(&mut self, events: SectionEvents<ExperienceItem>) {
        let blocked = self.dialog_open();
        apply_section(
            &mut self.portfolio.experiences,
            &mut self.experience_dialog,
            blocked,
            events,
        );
    }

    fn apply_education(&mut self, events: SectionEvents<EducationItem>) {
        let blocked = self.dialog_open();
        apply_section(
            &mut self.portfolio.education,
            &mut self.education_dialog,
            blocked,
            events,
        );
    }

    /// Draws one frame. While a dialog is open the page behind it is disabled.
    pub fn ui(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading(RichText::new("Portfolio Editor").size(26.0));
            ui.add_space(8.0);
        });

        let page_enabled = !self.dialog_open();
        let mut experience_events = SectionEvents::default();
        let mut education_events = SectionEvents::default();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(page_enabled, |ui| {
                if let Some(err) = &self.load_error {
                    ui.colored_label(
                        Color32::from_rgb(0xb9, 0x1c, 0x1c),
                        format!("Error loading portfolio: {err}"),
                    );
                    ui.separator();
                }

                ScrollArea::vertical().show(ui, |ui| {
                    self.personal_info_section(ui);
                    ui.add_space(16.0);
                    experience_events = self.experience_section(ui);
                    ui.add_space(16.0);
                    education_events = self.education_section(ui);
                });
            });
        });

        self.apply_experience(experience_events);
        self.apply_education(education_events);

        if let Some(dialog) = &mut self.experience_dialog {
            let outcome = dialog.show(ctx);
            apply_outcome(&mut self.experience_dialog, &mut self.portfolio.experiences, outcome);
        }
        if let Some(dialog) = &mut self.education_dialog {
            let outcome = dialog.show(ctx);
            apply_outcome(&mut self.education_dialog, &mut self.portfolio.education, outcome);
        }
    }
}

impl eframe::App for PortfolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}

/// What the user did in one list section during a frame.
struct SectionEvents<T> {
    add: bool,
    action: Option<CardAction>,
    reordered: Option<Vec<T>>,
}

impl<T> Default for SectionEvents<T> {
    fn default() -> Self {
        Self {
            add: false,
            action: None,
            reordered: None,
        }
    }
}

impl<T> SectionEvents<T> {
    fn is_empty(&self) -> bool {
        !self.add && self.action.is_none() && self.reordered.is_none()
    }
}

/// Applies a section's events to its list. Dialogs hold indices into the list, so nothing on the
/// page may touch it while one is open.
fn apply_section<T: EntryForm>(
    list: &mut Vec<T>,
    dialog: &mut Option<EditDialog<T>>,
    blocked: bool,
    events: SectionEvents<T>,
) {
    if events.is_empty() {
        return;
    }
    if blocked {
        debug!(noun = T::NOUN, "page input ignored while a dialog is open");
        return;
    }

    // a reorder replaces the list the card indices were taken from
    if let Some(items) = events.reordered {
        info!(noun = T::NOUN, "entries reordered");
        *list = items;
        return;
    }

    if events.add {
        *dialog = Some(EditDialog::add());
        return;
    }

    match events.action {
        Some(CardAction::Edit(idx)) => {
            if let Some(entry) = list.get(idx) {
                *dialog = Some(EditDialog::edit(idx, entry));
            }
        }
        Some(CardAction::Delete(idx)) => {
            if remove_entry(list, idx).is_some() {
                info!(noun = T::NOUN, index = idx, "entry deleted");
            }
        }
        None => {}
    }
}

fn apply_outcome<T: EntryForm>(
    dialog: &mut Option<EditDialog<T>>,
    list: &mut Vec<T>,
    outcome: DialogOutcome<T>,
) {
    match outcome {
        DialogOutcome::Open => {}
        DialogOutcome::Cancel => *dialog = None,
        DialogOutcome::Save { edit_index, entry } => {
            info!(noun = T::NOUN, ?edit_index, "entry saved");
            save_entry(list, edit_index, entry);
            *dialog = None;
        }
    }
}

/// Section title with an add button. Returns true if the button was clicked.
fn section_header(ui: &mut Ui, title: &str, add_label: &str) -> bool {
    ui.horizontal(|ui| {
        ui.heading(title);
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            ui.button(format!("+ {add_label}")).clicked()
        })
        .inner
    })
    .inner
}

fn drag_handle(ui: &mut Ui, handle: Handle) {
    handle.ui(ui, |ui| {
        ui.label(RichText::new("☰").size(18.0).weak());
    });
}

/// Title row shared by both card kinds, with the edit and delete buttons on the right.
fn card_title(ui: &mut Ui, index: usize, title: &str) -> Option<CardAction> {
    ui.horizontal(|ui| {
        ui.label(RichText::new(title).size(18.0).strong());
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.small_button("Delete").clicked() {
                return Some(CardAction::Delete(index));
            }
            if ui.small_button("Edit").clicked() {
                return Some(CardAction::Edit(index));
            }
            None
        })
        .inner
    })
    .inner
}

fn experience_card(
    ui: &mut Ui,
    handle: Handle,
    index: usize,
    item: &ExperienceItem,
) -> Option<CardAction> {
    ui.horizontal(|ui| {
        drag_handle(ui, handle);
        ui.vertical(|ui| {
            let action = card_title(ui, index, &item.title);
            ui.label(RichText::new(format!("{} | {}", item.company, item.date)).weak());
            ui.label(&item.description);
            if let Some(url) = &item.read_more_url {
                ui.hyperlink_to("Read more →", url);
            }
            if !item.skills.is_empty() {
                let chip = ui.visuals().faint_bg_color;
                ui.horizontal_wrapped(|ui| {
                    for skill in &item.skills {
                        ui.label(RichText::new(skill).strong().background_color(chip));
                    }
                });
            }
            action
        })
        .inner
    })
    .inner
}

fn education_card(
    ui: &mut Ui,
    handle: Handle,
    index: usize,
    item: &EducationItem,
) -> Option<CardAction> {
    ui.horizontal(|ui| {
        drag_handle(ui, handle);
        ui.vertical(|ui| {
            let action = card_title(ui, index, &item.degree);
            ui.label(RichText::new(format!("{} | {}", item.institution, item.date)).weak());
            for line in &item.description {
                ui.label(line);
            }
            action
        })
        .inner
    })
    .inner
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> PortfolioApp {
        PortfolioApp::new(PortfolioData::sample(), None)
    }

    fn action(action: CardAction) -> SectionEvents<ExperienceItem> {
        SectionEvents {
            action: Some(action),
            ..SectionEvents::default()
        }
    }

    #[test]
    fn delete_removes_the_card() {
        let mut app = app();
        let second = app.portfolio.experiences[1].clone();
        app.apply_experience(action(CardAction::Delete(0)));
        assert_eq!(app.portfolio.experiences.len(), 2);
        assert_eq!(app.portfolio.experiences[0], second);
    }

    #[test]
    fn edit_opens_a_dialog_on_that_entry() {
        let mut app = app();
        app.apply_experience(action(CardAction::Edit(1)));
        assert!(app.experience_dialog.as_ref().is_some_and(|d| d.is_editing()));
        assert!(app.education_dialog.is_none());
    }

    #[test]
    fn page_is_frozen_while_a_dialog_is_open() {
        let mut app = app();
        let before = app.portfolio.clone();
        app.apply_experience(action(CardAction::Edit(0)));

        app.apply_experience(action(CardAction::Delete(0)));
        let mut reversed = before.experiences.clone();
        reversed.reverse();
        app.apply_experience(SectionEvents {
            reordered: Some(reversed),
            ..SectionEvents::default()
        });
        app.apply_education(SectionEvents {
            add: true,
            ..SectionEvents::default()
        });

        assert_eq!(app.portfolio, before);
        assert!(app.education_dialog.is_none());
    }

    #[test]
    fn save_after_blocked_delete_edits_the_same_entry() {
        let mut app = app();
        app.apply_experience(action(CardAction::Edit(0)));
        app.apply_experience(action(CardAction::Delete(0)));

        let mut edited = app.portfolio.experiences[0].clone();
        edited.title = "Staff Engineer".into();
        apply_outcome(
            &mut app.experience_dialog,
            &mut app.portfolio.experiences,
            DialogOutcome::Save {
                edit_index: Some(0),
                entry: edited.clone(),
            },
        );

        assert!(app.experience_dialog.is_none());
        assert_eq!(app.portfolio.experiences[0], edited);
        assert_eq!(app.portfolio.experiences[1].company, "Contoso");
        assert_eq!(app.portfolio.experiences.len(), 3);
    }

    #[test]
    fn reorder_replaces_the_list() {
        let mut app = app();
        let mut reordered = app.portfolio.education.clone();
        reordered.swap(0, 1);
        app.apply_education(SectionEvents {
            reordered: Some(reordered.clone()),
            ..SectionEvents::default()
        });
        assert_eq!(app.portfolio.education, reordered);
    }

    #[test]
    fn add_then_save_appends() {
        let mut app = app();
        app.apply_education(SectionEvents {
            add: true,
            ..SectionEvents::default()
        });
        assert!(app.education_dialog.as_ref().is_some_and(|d| !d.is_editing()));

        let entry = EducationItem {
            degree: "PhD".into(),
            ..EducationItem::default()
        };
        apply_outcome(
            &mut app.education_dialog,
            &mut app.portfolio.education,
            DialogOutcome::Save {
                edit_index: None,
                entry: entry.clone(),
            },
        );
        assert_eq!(app.portfolio.education.last(), Some(&entry));
        assert!(app.education_dialog.is_none());
    }

    #[test]
    fn cancel_discards() {
        let mut app = app();
        let before = app.portfolio.clone();
        app.apply_experience(action(CardAction::Edit(2)));
        apply_outcome(
            &mut app.experience_dialog,
            &mut app.portfolio.experiences,
            DialogOutcome::Cancel,
        );
        assert!(app.experience_dialog.is_none());
        assert_eq!(app.portfolio, before);

        apply_outcome(
            &mut app.experience_dialog,
            &mut app.portfolio.experiences,
            DialogOutcome::Open,
        );
        assert!(app.experience_dialog.is_none());
    }

    #[test]
    fn frames_with_an_open_dialog_leave_the_page_alone() {
        let ctx = egui::Context::default();
        let mut app = app();
        let before = app.portfolio.clone();
        app.apply_experience(action(CardAction::Edit(0)));

        for _ in 0..3 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| app.ui(ctx));
        }

        assert!(app.experience_dialog.is_some());
        assert_eq!(app.portfolio, before);
    }
}
