use crate::PixelApp;
use crate::input::CanvasLayout;

pub fn central_panel(app: &mut PixelApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let layout = CanvasLayout::fit(ui.available_rect_before_wrap(), app.session.grid().size());
        let response = ui.allocate_rect(layout.rect, egui::Sense::click_and_drag());

        // Handle input
        app.handle_pointer(ctx, &response, &layout);

        // Render the canvas
        let painter = ui.painter_at(layout.rect);
        app.renderer.render(&painter, &layout, app.session.grid(), app.hover);
    });
}
