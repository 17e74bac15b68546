//! Input handling for the editor
//!
//! Turns one frame of `InputState` into `EditorCommand`s. The controller
//! only remembers whether a paint or erase drag is in progress; everything
//! else comes from the session snapshot it is given.

use super::camera::{CameraTransform, Viewport};
use super::palette::Palette;
use crate::ui::{EditorKey, InputState};
use crate::world::{GridCoord, TileType, Tool};

/// One editor operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    Place(GridCoord, TileType),
    Erase(GridCoord),
    /// Camera delta in pixels
    Scroll(i32),
    SelectTool(Tool),
    ToggleGrid,
    /// Save to the current level path
    Save,
    /// Reload from the current level path
    Load,
    /// Save to a path picked in a dialog
    SaveAs,
    /// Load from a path picked in a dialog
    Open,
    /// Write the whole world as a PNG
    Export,
}

/// What the controller needs to know about the session this frame
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub transform: CameraTransform,
    pub viewport: Viewport,
    pub palette: &'a Palette,
    pub tool: Tool,
    pub scroll_speed: i32,
}

#[derive(Debug, Default)]
pub struct EditorController {
    /// Left button went down in the editing area and is still held
    painting: bool,
    /// Right button went down in the editing area and is still held
    erasing: bool,
}

impl EditorController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_painting(&self) -> bool {
        self.painting
    }

    pub fn is_erasing(&self) -> bool {
        self.erasing
    }

    /// Commands for this frame, in the order they should be applied
    pub fn update(&mut self, input: &InputState, ctx: &FrameContext) -> Vec<EditorCommand> {
        let mut commands = Vec::new();
        self.keyboard(input, ctx, &mut commands);
        self.mouse(input, ctx, &mut commands);
        commands
    }

    fn keyboard(&self, input: &InputState, ctx: &FrameContext, out: &mut Vec<EditorCommand>) {
        if input.scroll_left {
            out.push(EditorCommand::Scroll(-ctx.scroll_speed));
        }
        if input.scroll_right {
            out.push(EditorCommand::Scroll(ctx.scroll_speed));
        }

        let ctrl = input.modifiers.ctrl;
        if ctrl && input.key_pressed(EditorKey::S) {
            out.push(if input.modifiers.shift {
                EditorCommand::SaveAs
            } else {
                EditorCommand::Save
            });
        }
        if ctrl && input.key_pressed(EditorKey::L) {
            out.push(EditorCommand::Load);
        }
        if ctrl && input.key_pressed(EditorKey::O) {
            out.push(EditorCommand::Open);
        }
        if ctrl && input.key_pressed(EditorKey::E) {
            out.push(EditorCommand::Export);
        }
        if !ctrl && input.key_pressed(EditorKey::G) {
            out.push(EditorCommand::ToggleGrid);
        }
    }

    fn mouse(&mut self, input: &InputState, ctx: &FrameContext, out: &mut Vec<EditorCommand>) {
        if input.left_released || !input.buttons.left {
            self.painting = false;
        }
        if input.right_released || !input.buttons.right {
            self.erasing = false;
        }

        let (mx, my) = input.mouse_pos();
        let in_editor = ctx.viewport.rect().contains(mx, my);

        if input.left_pressed && ctx.palette.area().contains(mx, my) {
            if let Some(tool) = ctx.palette.hit_test(mx, my) {
                out.push(EditorCommand::SelectTool(tool));
            }
            return;
        }
        if !in_editor {
            return;
        }

        let coord = ctx.transform.screen_to_world(mx, my);
        if input.left_pressed {
            self.painting = true;
        }
        if input.right_pressed {
            self.erasing = true;
        }

        if self.painting {
            out.push(match ctx.tool {
                Tool::Paint(tile) => EditorCommand::Place(coord, tile),
                Tool::Eraser => EditorCommand::Erase(coord),
            });
        } else if self.erasing {
            out.push(EditorCommand::Erase(coord));
        }
    }
}
