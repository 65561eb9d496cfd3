use client_core::Severity;
use eframe::egui;

#[derive(Debug, Clone, Copy)]
pub struct BadgeColors {
    pub text: egui::Color32,
    pub fill: egui::Color32,
    pub stroke: egui::Color32,
}

pub fn severity_colors(severity: Severity) -> BadgeColors {
    match severity {
        Severity::High => BadgeColors {
            text: egui::Color32::from_rgb(220, 38, 38),
            fill: egui::Color32::from_rgb(254, 242, 242),
            stroke: egui::Color32::from_rgb(254, 202, 202),
        },
        Severity::Medium => BadgeColors {
            text: egui::Color32::from_rgb(202, 138, 4),
            fill: egui::Color32::from_rgb(254, 252, 232),
            stroke: egui::Color32::from_rgb(254, 240, 138),
        },
        Severity::Low => BadgeColors {
            text: egui::Color32::from_rgb(22, 163, 74),
            fill: egui::Color32::from_rgb(240, 253, 244),
            stroke: egui::Color32::from_rgb(187, 247, 208),
        },
        Severity::Unknown => BadgeColors {
            text: egui::Color32::from_rgb(75, 85, 99),
            fill: egui::Color32::from_rgb(249, 250, 251),
            stroke: egui::Color32::from_rgb(229, 231, 235),
        },
    }
}

pub const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(254, 242, 242);
pub const ERROR_STROKE: egui::Color32 = egui::Color32::from_rgb(254, 202, 202);
pub const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(153, 27, 27);
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(37, 99, 235);
pub const ACTIVITY_DOT: egui::Color32 = egui::Color32::from_rgb(168, 85, 247);
