//! Icon, color, and label lookup for notifications.
//!
//! Every function here is total: unknown tags map to a generic fallback.

use serde::Serialize;

use edilhub_entity::notification::{EntityKind, Notification, NotificationKind, Priority};

/// Icon shown when a tag has no mapping.
pub const FALLBACK_ICON: &str = "bell";

/// Display attributes derived from a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationDisplay {
    /// Icon name.
    pub icon: &'static str,
    /// CSS classes for the priority badge.
    pub color: &'static str,
    /// Label for `tipo`.
    pub kind_label: &'static str,
    /// Label for `entita_tipo`.
    pub entity_label: &'static str,
    /// Label for `priorita`.
    pub priority_label: &'static str,
}

/// Icon for a notification.
///
/// Deadlines, alerts, and approvals have their own icon; conversions show
/// the icon of the document they produced.
pub fn icon_for(tipo: NotificationKind, entita_tipo: EntityKind) -> &'static str {
    match tipo {
        NotificationKind::Scadenza => "clock",
        NotificationKind::Alert => "alert-triangle",
        NotificationKind::Approvazione => "check-circle",
        NotificationKind::Conversione => entity_icon(entita_tipo),
    }
}

fn entity_icon(entita_tipo: EntityKind) -> &'static str {
    match entita_tipo {
        EntityKind::Preventivo => "file-text",
        EntityKind::Ordine => "shopping-cart",
        EntityKind::Ddt => "truck",
        EntityKind::Fattura => "receipt",
        EntityKind::Documento => "file",
    }
}

/// [`icon_for`] over untyped tags.
pub fn icon_for_raw(tipo: &str, entita_tipo: &str) -> &'static str {
    match tipo.parse::<NotificationKind>() {
        Ok(NotificationKind::Conversione) => entita_tipo
            .parse::<EntityKind>()
            .map(entity_icon)
            .unwrap_or(FALLBACK_ICON),
        Ok(kind) => icon_for(kind, EntityKind::Documento),
        Err(_) => FALLBACK_ICON,
    }
}

/// CSS classes for a priority badge.
pub fn color_for(priorita: Priority) -> &'static str {
    match priorita {
        Priority::Critica => "bg-red-100 text-red-800 border-red-300",
        Priority::Alta => "bg-orange-100 text-orange-800 border-orange-300",
        Priority::Media => "bg-yellow-100 text-yellow-800 border-yellow-300",
        Priority::Bassa => "bg-slate-100 text-slate-700 border-slate-300",
    }
}

/// [`color_for`] over an untyped tag. Unknown values get the `bassa` classes.
pub fn color_for_raw(priorita: &str) -> &'static str {
    color_for(priorita.parse().unwrap_or(Priority::Bassa))
}

/// Italian label for a notification type.
pub fn label_for_kind(tipo: NotificationKind) -> &'static str {
    match tipo {
        NotificationKind::Conversione => "Conversione",
        NotificationKind::Scadenza => "Scadenza",
        NotificationKind::Alert => "Avviso",
        NotificationKind::Approvazione => "Approvazione",
    }
}

/// Italian label for a business document kind.
pub fn label_for_entity(entita_tipo: EntityKind) -> &'static str {
    match entita_tipo {
        EntityKind::Preventivo => "Preventivo",
        EntityKind::Ordine => "Ordine",
        EntityKind::Ddt => "DDT",
        EntityKind::Fattura => "Fattura",
        EntityKind::Documento => "Documento",
    }
}

/// Italian label for a priority.
pub fn label_for_priority(priorita: Priority) -> &'static str {
    match priorita {
        Priority::Bassa => "Bassa",
        Priority::Media => "Media",
        Priority::Alta => "Alta",
        Priority::Critica => "Critica",
    }
}

/// All display attributes of `n`.
pub fn describe(n: &Notification) -> NotificationDisplay {
    NotificationDisplay {
        icon: icon_for(n.tipo, n.entita_tipo),
        color: color_for(n.priorita),
        kind_label: label_for_kind(n.tipo),
        entity_label: label_for_entity(n.entita_tipo),
        priority_label: label_for_priority(n.priorita),
    }
}
