use egui::{Align2, Context, Id, TextEdit, Ui, Vec2};

use crate::model::{EducationItem, ExperienceItem};

/// An entry type that can be edited in an [EditDialog].
pub trait EntryForm: Clone {
    const NOUN: &'static str;

    /// The draft a freshly added entry starts from.
    fn blank() -> Self;

    /// Draws the form fields. `scratch` is a text buffer owned by the dialog.
    fn form(&mut self, ui: &mut Ui, scratch: &mut String);
}

pub enum DialogOutcome<T> {
    Open,
    Cancel,
    Save { edit_index: Option<usize>, entry: T },
}

/// Edits a copy of an entry. Nothing is written back until the user saves.
pub struct EditDialog<T> {
    draft: T,
    edit_index: Option<usize>,
    scratch: String,
}

impl<T: EntryForm> EditDialog<T> {
    pub fn add() -> Self {
        Self {
            draft: T::blank(),
            edit_index: None,
            scratch: String::new(),
        }
    }

    pub fn edit(index: usize, entry: &T) -> Self {
        Self {
            draft: entry.clone(),
            edit_index: Some(index),
            scratch: String::new(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.edit_index.is_some()
    }

    pub fn show(&mut self, ctx: &Context) -> DialogOutcome<T> {
        let verb = if self.is_editing() { "Edit" } else { "Add" };
        let mut outcome = DialogOutcome::Open;

        egui::Window::new(format!("{verb} {}", T::NOUN))
            .id(Id::new(("edit_dialog", T::NOUN)))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                self.draft.form(ui, &mut self.scratch);
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        outcome = DialogOutcome::Cancel;
                    }
                    if ui.button("Save").clicked() {
                        outcome = DialogOutcome::Save {
                            edit_index: self.edit_index,
                            entry: self.draft.clone(),
                        };
                    }
                });
            });

        outcome
    }
}

fn field(ui: &mut Ui, label: &str, value: &mut String) {
    ui.label(label);
    ui.add(TextEdit::singleline(value).desired_width(f32::INFINITY));
}

impl EntryForm for ExperienceItem {
    const NOUN: &'static str = "Experience";

    fn blank() -> Self {
        Self::default()
    }

    fn form(&mut self, ui: &mut Ui, new_skill: &mut String) {
        field(ui, "Job Title", &mut self.title);
        field(ui, "Company", &mut self.company);
        ui.label("Date");
        ui.add(
            TextEdit::singleline(&mut self.date)
                .hint_text("e.g., Apr. 2024 - today")
                .desired_width(f32::INFINITY),
        );
        ui.label("Description");
        ui.add(
            TextEdit::multiline(&mut self.description)
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );

        let mut url = self.read_more_url.clone().unwrap_or_default();
        ui.label("Read more URL");
        if ui
            .add(TextEdit::singleline(&mut url).desired_width(f32::INFINITY))
            .changed()
        {
            self.read_more_url = (!url.trim().is_empty()).then_some(url);
        }

        ui.label("Skills");
        let mut removed = None;
        ui.horizontal_wrapped(|ui| {
            for (idx, skill) in self.skills.iter().enumerate() {
                if ui.small_button(format!("{skill} ✕")).clicked() {
                    removed = Some(idx);
                }
            }
        });
        if let Some(idx) = removed {
            self.skills.remove(idx);
        }

        ui.horizontal(|ui| {
            let input = ui.text_edit_singleline(new_skill);
            let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if (ui.button("Add skill").clicked() || submitted) && self.add_skill(new_skill) {
                new_skill.clear();
            }
        });
    }
}

impl EntryForm for EducationItem {
    const NOUN: &'static str = "Education";

    fn blank() -> Self {
        Self {
            description: vec![String::new()],
            ..Self::default()
        }
    }

    fn form(&mut self, ui: &mut Ui, _scratch: &mut String) {
        field(ui, "Degree", &mut self.degree);
        field(ui, "Institution", &mut self.institution);
        field(ui, "Date", &mut self.date);

        ui.label("Description");
        let mut removed = None;
        for (idx, line) in self.description.iter_mut().enumerate() {
            ui.horizontal(|ui| {
                ui.text_edit_singleline(line);
                if ui.small_button("✕").clicked() {
                    removed = Some(idx);
                }
            });
        }
        if let Some(idx) = removed {
            self.description.remove(idx);
        }
        if ui.button("Add line").clicked() {
            self.description.push(String::new());
        }
    }
}
