//! Header, footer and status screens drawn around the content.

use core::fmt::Write as _;

use alloc::format;

use super::{FontScale, Point, Rect, Surface, TextAnchor, Tone};
use crate::{
    config::DEFAULT_STREAM_PORT,
    layout::{
        FOOTER_HEIGHT, FOOTER_ZONES, HEADER_FONT, HEADER_HEIGHT, MARGIN, SLEEP_BAND_HEIGHT,
        SLEEP_TOP_PADDING, footer_top,
    },
};

const BATTERY_ICON_W: i32 = 24;
const BATTERY_ICON_H: i32 = 12;
const BATTERY_TERMINAL_W: i32 = 3;
const BATTERY_TERMINAL_H: i32 = 6;
const BATTERY_GAP: i32 = 4;
const BATTERY_FILL_PADDING: i32 = 2;

const TITLE_FONT: FontScale = FontScale::new(3);
const WELCOME_SECTION_ADVANCE: i32 = 40;
const WELCOME_COMMAND_ADVANCE: i32 = 32;
const WELCOME_SECTION_GAP: i32 = 15;

const SLEEPING_LABEL: &str = "Sleeping...";
const FOOTER_BUTTONS: [&str; FOOTER_ZONES as usize] = ["|<<", "<", "", ">", ">>|"];

/// Header band: address left, `label` centred, battery right.
///
/// `battery` is `None` when the level could not be read; the icon is omitted.
pub fn draw_header<S: Surface + ?Sized>(
    surface: &mut S,
    address: &str,
    label: &str,
    battery: Option<u8>,
) {
    let w = surface.width();
    surface.fill_rect(Rect::new(0, 0, w, HEADER_HEIGHT), Tone::LightGrey);
    surface.draw_line(
        Point::new(0, HEADER_HEIGHT),
        Point::new(w, HEADER_HEIGHT),
        Tone::Black,
    );

    let text_y = (HEADER_HEIGHT - surface.font_height(HEADER_FONT)) / 2 + 1;
    surface.draw_text(
        address,
        Point::new(MARGIN, text_y),
        TextAnchor::TopLeft,
        HEADER_FONT,
    );

    if !label.is_empty() {
        let label_w = surface.text_width(label, HEADER_FONT);
        surface.draw_text(
            label,
            Point::new((w - label_w) / 2, text_y),
            TextAnchor::TopLeft,
            HEADER_FONT,
        );
    }

    if let Some(level) = battery {
        draw_battery(surface, level.min(100), w, text_y);
    }
}

fn draw_battery<S: Surface + ?Sized>(surface: &mut S, level: u8, w: i32, text_y: i32) {
    let mut text: heapless::String<8> = heapless::String::new();
    let _ = write!(text, "{level}%");

    let text_x = w - MARGIN - surface.text_width(&text, HEADER_FONT);
    let icon_x = text_x - BATTERY_GAP - BATTERY_ICON_W;
    let icon_y = (HEADER_HEIGHT - BATTERY_ICON_H) / 2;

    surface.draw_rect(
        Rect::new(icon_x, icon_y, BATTERY_ICON_W, BATTERY_ICON_H),
        Tone::Black,
    );
    surface.fill_rect(
        Rect::new(
            icon_x + BATTERY_ICON_W,
            icon_y + (BATTERY_ICON_H - BATTERY_TERMINAL_H) / 2,
            BATTERY_TERMINAL_W,
            BATTERY_TERMINAL_H,
        ),
        Tone::Black,
    );

    let fill_w = battery_fill_width(level);
    if fill_w > 0 {
        surface.fill_rect(
            Rect::new(
                icon_x + BATTERY_FILL_PADDING,
                icon_y + BATTERY_FILL_PADDING,
                fill_w,
                BATTERY_ICON_H - BATTERY_FILL_PADDING * 2,
            ),
            Tone::Black,
        );
    }

    surface.draw_text(
        &text,
        Point::new(text_x, text_y),
        TextAnchor::TopLeft,
        HEADER_FONT,
    );
}

/// Width of the battery fill bar for `level` percent.
pub fn battery_fill_width(level: u8) -> i32 {
    let max_fill = BATTERY_ICON_W - BATTERY_FILL_PADDING * 2;
    i32::from(level.min(100)) * max_fill / 100
}

/// Footer navigation bar: `|<<`, `<`, `n/N`, `>`, `>>|`.
pub fn draw_footer<S: Surface + ?Sized>(surface: &mut S, page_index: usize, page_count: usize) {
    let w = surface.width();
    let top = footer_top(surface.height());
    let zone_w = w / FOOTER_ZONES;
    let mid_y = top + FOOTER_HEIGHT / 2;

    surface.draw_line(Point::new(0, top), Point::new(w, top), Tone::Black);

    let mut page_info: heapless::String<24> = heapless::String::new();
    let _ = write!(page_info, "{}/{}", page_index + 1, page_count.max(1));

    for (zone, button) in FOOTER_BUTTONS.iter().enumerate() {
        let zone = zone as i32;
        let label = if button.is_empty() {
            page_info.as_str()
        } else {
            surface.draw_rect(Rect::new(zone * zone_w, top, zone_w, FOOTER_HEIGHT), Tone::LightGrey);
            button
        };
        surface.draw_text(
            label,
            Point::new(zone * zone_w + zone_w / 2, mid_y),
            TextAnchor::MiddleCenter,
            HEADER_FONT,
        );
    }
}

/// White band with "Sleeping..." across the bottom of the screen.
pub fn draw_sleep_band<S: Surface + ?Sized>(surface: &mut S) {
    let w = surface.width();
    let top = surface.height() - SLEEP_BAND_HEIGHT;

    surface.fill_rect(Rect::new(0, top, w, SLEEP_BAND_HEIGHT), Tone::White);
    surface.draw_line(Point::new(0, top), Point::new(w, top), Tone::Black);
    surface.draw_text(
        SLEEPING_LABEL,
        Point::new(w / 2, top + SLEEP_BAND_HEIGHT / 2),
        TextAnchor::MiddleCenter,
        HEADER_FONT,
    );
}

/// Idle screen listing the ways content can reach the display.
pub fn draw_welcome<S: Surface + ?Sized>(
    surface: &mut S,
    address: &str,
    battery: Option<u8>,
    sleeping: bool,
) {
    let w = surface.width();
    let h = surface.height();
    let cx = w / 2;

    draw_header(surface, address, "", battery);

    let mut y = HEADER_HEIGHT + MARGIN + SLEEP_TOP_PADDING;
    surface.draw_text("Paper Piper", Point::new(cx, y), TextAnchor::MiddleCenter, TITLE_FONT);
    y += 50;

    let text_hint = format!("curl -d 'msg' {address}/api/text");
    let image_hint = format!("curl --data-binary @photo.jpg {address}/api/image");
    let stream_hint = format!("nc {address} {DEFAULT_STREAM_PORT}");
    let feed_hint = format!("{address}/api/mqtt");
    let sections: [(&str, &[&str]); 5] = [
        ("-- TEXT --", &[text_hint.as_str()]),
        ("-- IMAGE --", &[image_hint.as_str()]),
        ("-- STREAM --", &[stream_hint.as_str()]),
        ("-- MAP --", &["/api/image with X-Content-Type: map"]),
        (
            "-- FEED --",
            &[feed_hint.as_str(), "--broker host --topic sensors/#"],
        ),
    ];

    for (title, commands) in &sections {
        surface.draw_text(title, Point::new(cx, y), TextAnchor::MiddleCenter, TITLE_FONT);
        y += WELCOME_SECTION_ADVANCE;
        for command in commands.iter() {
            surface.draw_text(command, Point::new(cx, y), TextAnchor::MiddleCenter, HEADER_FONT);
            y += WELCOME_COMMAND_ADVANCE;
        }
        y += WELCOME_SECTION_GAP;
    }

    if sleeping {
        surface.draw_text(
            SLEEPING_LABEL,
            Point::new(cx, h - SLEEP_TOP_PADDING),
            TextAnchor::BottomCenter,
            TITLE_FONT,
        );
    }
}
