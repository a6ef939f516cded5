//! Egui layout for the grouping UI.
//!
//! Widgets never mutate the session directly. Each interaction pushes a
//! [`UiAction`] and the whole batch is applied after layout, so one frame
//! sees one consistent snapshot of the store.

use egui::{Align, Color32, Context, Frame, Id, Layout, Margin, RichText, Rounding, Stroke, Ui};

use crate::store::{Group, INDIVIDUAL_NAME};
use crate::types::{GroupId, PartitionId, Series};

use super::state::{App, UiAction};

const CARD_WIDTH: f32 = 160.0;

/// Payload carried while a series row is being dragged between cards.
#[derive(Debug, Clone)]
struct DragSeries {
    label: String,
    from: PartitionId,
}

/// Draw the main application UI
pub fn draw_ui(app: &mut App, ctx: &Context) {
    let mut actions: Vec<UiAction> = Vec::new();

    egui::SidePanel::left("side_panel").show(ctx, |ui| {
        ui.heading("Series Groups");
        ui.separator();

        ui.label("New group:");
        let response = ui.text_edit_singleline(&mut app.new_group_name);
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Add group").clicked() || submitted {
            actions.push(UiAction::AddGroup(app.new_group_name.clone()));
            app.new_group_name.clear();
        }

        ui.separator();
        if ui.button("Regenerate data").clicked() {
            actions.push(UiAction::Regenerate);
        }
        if ui.button("Reset").clicked() {
            actions.push(UiAction::Reset);
        }

        if let Some(status) = &app.status {
            ui.separator();
            ui.colored_label(Color32::RED, status);
        }
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        chart_section(app, ctx, ui);
        ui.separator();
        cards_section(app, ui, &mut actions);
    });

    for action in actions {
        app.apply(action);
    }
}

fn chart_section(app: &mut App, ctx: &Context, ui: &mut Ui) {
    let avail = ui.available_size();
    let width = avail.x.max(64.0).round() as u32;
    let height = (avail.y * 0.6).max(64.0).round() as u32;

    let revision = app.session.revision();
    let frame = app.session.sink().frame().clone();
    match app
        .chart
        .texture(ctx, revision, (width, height), &frame, &app.theme, &app.style)
    {
        Ok(texture) => {
            ui.image(&texture);
        }
        Err(e) => {
            ui.colored_label(Color32::RED, format!("Plotting error: {e}"));
        }
    }
}

fn cards_section(app: &App, ui: &mut Ui, actions: &mut Vec<UiAction>) {
    egui::ScrollArea::horizontal().show(ui, |ui| {
        ui.horizontal_top(|ui| {
            individual_card(app, ui, actions);
            for (id, group) in app.session.store().groups() {
                let members: Vec<&Series> = match app.session.store().group_members(id) {
                    Ok(members) => members.collect(),
                    Err(_) => continue,
                };
                group_card(ui, id, group, &members, actions);
            }
        });
    });
}

fn individual_card(app: &App, ui: &mut Ui, actions: &mut Vec<UiAction>) {
    let members: Vec<&Series> = app.session.store().individual().collect();
    let (_, payload) = ui.dnd_drop_zone::<DragSeries, ()>(card_frame(ui), |ui| {
        ui.set_min_width(CARD_WIDTH);
        let mut all_active = !members.is_empty() && members.iter().all(|s| s.active);
        if ui
            .checkbox(&mut all_active, RichText::new(INDIVIDUAL_NAME).strong())
            .changed()
        {
            actions.push(UiAction::SetMembersActive {
                partition: PartitionId::Individual,
                active: all_active,
            });
        }
        ui.separator();
        if members.is_empty() {
            ui.weak("Add items here");
        }
        for series in &members {
            item_row(ui, series, PartitionId::Individual, actions);
        }
    });
    if let Some(drag) = payload {
        actions.push(UiAction::Move {
            label: drag.label.clone(),
            from: drag.from,
            to: PartitionId::Individual,
        });
    }
}

fn group_card(
    ui: &mut Ui,
    id: GroupId,
    group: &Group,
    members: &[&Series],
    actions: &mut Vec<UiAction>,
) {
    let partition = PartitionId::Group(id);
    let (_, payload) = ui.dnd_drop_zone::<DragSeries, ()>(card_frame(ui), |ui| {
        ui.set_min_width(CARD_WIDTH);
        ui.horizontal(|ui| {
            let mut gate = group.is_active();
            if ui
                .checkbox(&mut gate, RichText::new(group.name()).strong())
                .changed()
            {
                actions.push(UiAction::SetGroupActive { id, active: gate });
            }
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.small_button("🗑").on_hover_text("Remove group").clicked() {
                    actions.push(UiAction::RemoveGroup(id));
                }
            });
        });
        ui.separator();
        if members.is_empty() {
            ui.weak("Add items here");
        }
        for series in members {
            item_row(ui, series, partition, actions);
        }
    });
    if let Some(drag) = payload {
        actions.push(UiAction::Move {
            label: drag.label.clone(),
            from: drag.from,
            to: partition,
        });
    }
}

/// One draggable series row. The checkbox toggles the series on its own;
/// dragging the row carries its label to whichever card it lands on.
fn item_row(ui: &mut Ui, series: &Series, from: PartitionId, actions: &mut Vec<UiAction>) {
    let payload = DragSeries {
        label: series.label.clone(),
        from,
    };
    ui.dnd_drag_source(Id::new(("series-row", &series.label)), payload, |ui| {
        let mut active = series.active;
        if ui.checkbox(&mut active, &series.label).changed() {
            actions.push(UiAction::SetSeriesActive {
                label: series.label.clone(),
                active,
            });
        }
    });
}

fn card_frame(ui: &Ui) -> Frame {
    Frame::none()
        .stroke(Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
        .rounding(Rounding::same(6.0))
        .inner_margin(Margin::same(8.0))
}
