impl<S, C, T, M, P> PaperApp<S, C, T, M, P>
where
    S: Surface,
    C: ContentSource,
    T: TouchProvider,
    M: MotionSensor,
    P: PowerControl,
{
    fn header_label(&self) -> &'static str {
        match self.mode {
            Mode::None => "",
            Mode::Text => "TEXT",
            Mode::MessageFeed => "FEED",
            Mode::Stream => "STREAM",
            Mode::Image => self.image.tag().header_label(),
        }
    }

    fn flush_redraw(&mut self, now_ms: u64) -> bool {
        let redraw = core::mem::replace(&mut self.pending_redraw, Redraw::None);
        match redraw {
            Redraw::None => false,
            Redraw::Stream => {
                self.draw_stream(false, now_ms);
                true
            }
            Redraw::Full => {
                self.draw_layout(now_ms);
                true
            }
        }
    }

    /// Redraws the whole screen for the active mode.
    fn draw_layout(&mut self, now_ms: u64) {
        if self.mode == Mode::Stream {
            self.draw_stream(true, now_ms);
            return;
        }

        let battery = self.battery_level();
        let label = self.header_label();
        self.surface.set_refresh_mode(RefreshMode::Quality);
        self.surface.fill_screen(Tone::White);

        match self.mode {
            Mode::None => draw_welcome(&mut self.surface, &self.address, battery, false),
            Mode::Text | Mode::MessageFeed => {
                self.draw_page(content_top(self.ui_visible));
                if self.ui_visible {
                    draw_header(&mut self.surface, &self.address, label, battery);
                    draw_footer(
                        &mut self.surface,
                        self.document.page_index(),
                        self.document.page_count(),
                    );
                }
            }
            Mode::Image => {
                let outcome = self.compositor.compose(&mut self.surface, &self.image);
                debug!("image: drawn outcome={:?}", outcome);
                if self.ui_visible {
                    draw_header(&mut self.surface, &self.address, label, battery);
                }
            }
            Mode::Stream => {}
        }

        self.surface.present();
    }

    fn draw_page(&mut self, top: i32) {
        let area = page_area(self.surface.width(), self.surface.height(), self.ui_visible);
        let scale = self.document.font_scale();
        let line_height = page_line_height(&self.surface, scale);
        self.surface.draw_text_wrapped(
            self.document.current_page(),
            Point::new(MARGIN, top),
            scale,
            area.width,
            line_height,
        );
    }

    /// Draws the newest stream lines bottom-up between `top` and `bottom`.
    fn draw_stream_lines(&mut self, top: i32, bottom: i32) {
        let area = page_area(self.surface.width(), self.surface.height(), false);
        let line_height = stream_line_height(&self.surface, self.font_scale);

        let placed = self.stream.visible_lines(
            &self.surface,
            self.font_scale,
            area,
            top,
            bottom,
            line_height,
        );
        for (text, y) in placed {
            self.surface.draw_text_wrapped(
                &text,
                Point::new(MARGIN, y),
                self.font_scale,
                area.width,
                line_height,
            );
        }
    }

    /// Stream view on the fast waveform. `full` also clears the chrome bands.
    fn draw_stream(&mut self, full: bool, now_ms: u64) {
        let battery = if self.ui_visible {
            self.battery_level()
        } else {
            None
        };
        let label = self.header_label();
        let top = content_top(self.ui_visible);
        let w = self.surface.width();
        let h = self.surface.height();

        self.surface.set_refresh_mode(RefreshMode::Fast);
        if full {
            self.surface.fill_screen(Tone::White);
        } else {
            self.surface.fill_rect(Rect::new(0, top, w, h - top), Tone::White);
        }

        self.draw_stream_lines(top, h - MARGIN);

        if self.ui_visible {
            draw_header(&mut self.surface, &self.address, label, battery);
        }
        self.surface.present();
        self.stream.mark_drawn(now_ms);
    }

    /// Content without chrome plus the sleeping indicator; the panel keeps it
    /// after power-off.
    fn draw_sleep_screen(&mut self) {
        let battery = if self.mode == Mode::None {
            self.battery_level()
        } else {
            None
        };
        self.surface.set_refresh_mode(RefreshMode::Quality);
        self.surface.fill_screen(Tone::White);

        match self.mode {
            Mode::None => {
                draw_welcome(&mut self.surface, &self.address, battery, true);
                self.surface.present();
                return;
            }
            Mode::Text | Mode::MessageFeed => self.draw_page(SLEEP_TOP_PADDING),
            Mode::Image => {
                let outcome = self.compositor.compose_for_sleep(&mut self.surface, &self.image);
                debug!("image: sleep redraw outcome={:?}", outcome);
            }
            Mode::Stream => {
                let bottom = self.surface.height() - SLEEP_BAND_HEIGHT - MARGIN;
                self.draw_stream_lines(MARGIN, bottom);
            }
        }

        draw_sleep_band(&mut self.surface);
        self.surface.present();
    }
}
