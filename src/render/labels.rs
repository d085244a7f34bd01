//! 展示名称查找表

use phf::phf_map;

use crate::models::FileKind;

static SECTION_NAMES: phf::Map<&'static str, &'static str> = phf_map! {
    "struktur_vergleich" => "Struktur & Aufbau",
    "visueller_vergleich" => "Visuelle Qualität",
    "funktionale_elemente" => "Funktionalität",
    "sap_kontext" => "SAP-Kontext",
    "diagramm_vergleich" => "Diagramm-Struktur",
    "technische_umsetzung" => "Technische Umsetzung",
    "sap_bw_korrektheit" => "SAP BW Korrektheit",
    "verstaendlichkeit" => "Verständlichkeit",
    "prozess_vergleich" => "Prozess-Vergleich",
    "konfiguration" => "Konfiguration",
    "monitoring" => "Monitoring",
    "sap_standard" => "SAP Standard",
    "mapping_vergleich" => "Mapping",
    "business_logik" => "Business-Logik",
    "dokumentation" => "Dokumentation",
    "technische_definition" => "Definition",
    "metadaten" => "Metadaten",
    "integration" => "Integration",
    "query_struktur" => "Query-Struktur",
    "darstellung" => "Darstellung",
    "fachliche_korrektheit" => "Fachliche Korrektheit",
};

static CRITERION_NAMES: phf::Map<&'static str, &'static str> = phf_map! {
    "tabellenstruktur_korrekt" => "Struktur OK",
    "spalten_angemessen" => "Spalten OK",
    "header_vorhanden" => "Header OK",
    "formatierung_angemessen" => "Format OK",
    "lesbarkeit_gut" => "Lesbar",
    "professionell" => "Professionell",
    "formeln_korrekt" => "Formeln OK",
    "berechnungen_richtig" => "Berechnungen OK",
    "vollstaendig" => "Vollständig",
    "kontext_korrekt" => "Kontext OK",
    "business_sinnvoll" => "Business OK",
    "integration_erkennbar" => "Integration OK",
};

/// 类别/分区名称，未知键原样返回
pub fn section_name(key: &str) -> &str {
    SECTION_NAMES.get(key).copied().unwrap_or(key)
}

/// 检查项名称，未知键把下划线替换为空格
pub fn criterion_name(key: &str) -> String {
    CRITERION_NAMES
        .get(key)
        .map(|name| name.to_string())
        .unwrap_or_else(|| key.replace('_', " "))
}

/// 按文件类型选择图标
pub fn file_icon(kind: Option<FileKind>) -> &'static str {
    match kind {
        Some(FileKind::Zip) => "📦",
        Some(FileKind::Pdf) => "📄",
        Some(FileKind::Jpg | FileKind::Jpeg | FileKind::Png) => "🖼️",
        None => "📁",
    }
}
