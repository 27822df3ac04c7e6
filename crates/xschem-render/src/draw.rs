//! Dispatches a [`Sheet`]'s geometry to a [`Renderer`], one primitive at
//! a time, transforming each instance's symbol geometry into world space
//! via [`rotate_flip`] before handing it off -- the source's `draw()`
//! flattened into a single pass per spec §4.11/§6.

use xschem_geom::{Point, rotate_flip};
use xschem_io::{Phase, Renderer};
use xschem_state::Sheet;

/// Draws every wire, instance and text item on `sheet`, in `Phase::Add`
/// so a backend can batch the whole frame and flush once.
pub fn draw_sheet<R: Renderer>(sheet: &Sheet, renderer: &mut R) {
    for wire in &sheet.wires {
        renderer.drawline(0, Phase::Add, wire.p1, wire.p2);
    }
    for inst in &sheet.instances {
        draw_instance(sheet, inst, renderer);
    }
    for text in &sheet.texts {
        if text.flags.contains(xschem_state::TextFlags::HIDDEN) {
            continue;
        }
        let shown = text.floater_cache.as_deref().unwrap_or(&text.text);
        renderer.draw_string(text.layer, Phase::Add, shown, Point::new(text.x, text.y));
    }
}

fn draw_instance<R: Renderer>(sheet: &Sheet, inst: &xschem_state::Instance, renderer: &mut R) {
    if inst.flags.contains(xschem_state::InstanceFlags::HIDE) {
        return;
    }
    let Some(symbol) = inst.resolve(&sheet.symbols) else {
        return;
    };
    let orientation = xschem_geom::Orientation::new(inst.rotation, inst.flip);
    let origin = Point::origin();

    for line in &symbol.lines {
        let p1 = rotate_flip(orientation, origin, line.p1, inst.position);
        let p2 = rotate_flip(orientation, origin, line.p2, inst.position);
        renderer.drawline(line.meta.layer, Phase::Add, p1, p2);
    }
    for rect in &symbol.rects {
        let c1 = rotate_flip(orientation, origin, Point::new(rect.rect.x1, rect.rect.y1), inst.position);
        let c2 = rotate_flip(orientation, origin, Point::new(rect.rect.x2, rect.rect.y2), inst.position);
        let world = xschem_geom::Rect::new(c1.x, c1.y, c2.x, c2.y);
        renderer.drawrect(rect.meta.layer, Phase::Add, world);
    }
    for text in &symbol.texts {
        if inst.flags.contains(xschem_state::InstanceFlags::HIDE_TEXTS) {
            continue;
        }
        let at = rotate_flip(orientation, origin, Point::new(text.x, text.y), inst.position);
        renderer.draw_string(text.layer, Phase::Add, &text.text, at);
    }
}
