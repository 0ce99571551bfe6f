//! Paints a [`UserCard`] as a framed four-column row.

use client_core::UserCard;
use eframe::egui;

const CARD_LABEL_COLOR: egui::Color32 = egui::Color32::from_rgb(120, 126, 138);

pub fn show_user_card(ui: &mut egui::Ui, card: &UserCard) {
    egui::Frame::group(ui.style())
        .corner_radius(8.0)
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.columns(card.fields.len(), |columns| {
                for (column, field) in columns.iter_mut().zip(&card.fields) {
                    column.label(
                        egui::RichText::new(field.label)
                            .small()
                            .color(CARD_LABEL_COLOR),
                    );
                    let value = egui::Label::new(field.value.as_str());
                    if field.truncate {
                        column.add(value.truncate());
                    } else {
                        column.add(value);
                    }
                }
            });
        });
}
