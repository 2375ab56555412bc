//! Textual readout panel.
//!
//! Pages write their readouts into [`PanelText`]; with the `text` feature a
//! UI node in the top-left corner mirrors it, and schematic labels are laid
//! out as absolutely positioned text nodes.

use bevy::prelude::*;

/// Lines shown in the readout panel.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelText {
    lines: Vec<String>,
}

impl PanelText {
    /// Replaces the panel contents, returning whether they changed.
    pub fn set(&mut self, lines: Vec<String>) -> bool {
        if self.lines == lines {
            return false;
        }
        self.lines = lines;
        true
    }

    /// Current lines, top first.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines joined for a single text block.
    #[must_use]
    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }
}

/// Writes `lines` into `panel` without tripping change detection when equal.
pub fn update_panel(panel: &mut ResMut<PanelText>, lines: Vec<String>) {
    if panel.bypass_change_detection().set(lines) {
        panel.set_changed();
    }
}

#[cfg(feature = "text")]
pub(crate) use text_panel::ReadoutPanelPlugin;

#[cfg(feature = "text")]
mod text_panel {
    use bevy::prelude::*;

    use super::PanelText;
    use crate::pages::canvas::SchematicCanvas;
    use crate::schematic::DrawCommand;

    #[derive(Component, Debug)]
    struct ReadoutPanel;

    #[derive(Component, Debug)]
    struct SchematicLabel;

    fn spawn_panel(mut commands: Commands) {
        commands.spawn((
            ReadoutPanel,
            Text::new(""),
            TextFont::from_font_size(15.0),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(12.0),
                top: Val::Px(12.0),
                ..default()
            },
            Name::new("ReadoutPanel"),
        ));
    }

    #[expect(
        clippy::needless_pass_by_value,
        reason = "Bevy systems require parameters by value, not by reference."
    )]
    fn sync_panel(panel: Res<PanelText>, mut texts: Query<&mut Text, With<ReadoutPanel>>) {
        if !panel.is_changed() {
            return;
        }
        for mut text in &mut texts {
            text.0 = panel.joined();
        }
    }

    /// Rebuilds the label nodes when the frame on screen differs from the last one labelled.
    #[expect(
        clippy::needless_pass_by_value,
        reason = "Bevy systems require parameters by value, not by reference."
    )]
    fn sync_labels(
        mut commands: Commands,
        canvas: Option<Res<SchematicCanvas>>,
        labels: Query<Entity, With<SchematicLabel>>,
        mut shown: Local<(Vec<DrawCommand>, Option<String>)>,
    ) {
        let Some(canvas) = canvas else {
            return;
        };
        if shown.0.as_slice() == canvas.frame() && shown.1.as_deref() == canvas.fallback() {
            return;
        }
        shown.0 = canvas.frame().to_vec();
        shown.1 = canvas.fallback().map(str::to_owned);
        for entity in &labels {
            commands.entity(entity).despawn();
        }
        if let Some(message) = canvas.fallback() {
            commands.spawn(label(Vec2::new(24.0, 48.0), message.to_owned(), Color::WHITE, 16.0));
            return;
        }
        for command in canvas.frame() {
            match command {
                DrawCommand::Text {
                    position,
                    text,
                    color,
                    size,
                } => {
                    let color = Color::srgba(color.r, color.g, color.b, color.a);
                    commands.spawn(label(*position - Vec2::new(0.0, *size), text.clone(), color, *size));
                }
                DrawCommand::Arrow {
                    to, color, label: text, ..
                } if !text.is_empty() => {
                    let color = Color::srgba(color.r, color.g, color.b, color.a);
                    commands.spawn(label(*to + Vec2::new(8.0, -6.0), text.clone(), color, 12.0));
                }
                _ => {}
            }
        }
    }

    fn label(position: Vec2, text: String, color: Color, size: f32) -> impl Bundle {
        (
            SchematicLabel,
            Text::new(text),
            TextFont::from_font_size(size),
            TextColor(color),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(position.x),
                top: Val::Px(position.y),
                ..default()
            },
        )
    }

    /// Shows [`PanelText`] and schematic labels as UI text.
    #[derive(Debug)]
    pub struct ReadoutPanelPlugin;

    impl Plugin for ReadoutPanelPlugin {
        fn build(&self, app: &mut App) {
            app.init_resource::<PanelText>();
            app.add_systems(Startup, spawn_panel);
            app.add_systems(PostUpdate, (sync_panel, sync_labels));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_reports_changes_only() {
        let mut panel = PanelText::default();
        assert!(panel.set(vec!["HOLD".to_owned()]));
        assert!(!panel.set(vec!["HOLD".to_owned()]));
        assert_eq!(panel.joined(), "HOLD");
    }
}
