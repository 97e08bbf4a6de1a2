// FICHIER : src-core/src/reference/tables.rs

//! Données tabulées BS 7671 (18e édition).

/// Méthodes de référence des colonnes de `CABLE_CAPACITY`.
pub const REFERENCE_METHODS: [&str; 7] = ["100", "101", "102", "103", "C", "A", "B"];

/// Courant admissible Iz (A) du câble plat twin & earth 70 °C, Table 4D5
/// (colonne B : Table 4D2A, deux conducteurs sous conduit).
/// Ligne : (section mm², [100, 101, 102, 103, C, A, B]).
pub const CABLE_CAPACITY: &[(f64, [f64; 7])] = &[
    (1.0, [16.0, 13.0, 13.0, 8.0, 16.0, 11.5, 13.5]),
    (1.5, [20.0, 16.0, 16.0, 10.0, 20.0, 14.5, 17.5]),
    (2.5, [27.0, 21.0, 21.0, 13.5, 27.0, 20.0, 24.0]),
    (4.0, [37.0, 27.0, 27.0, 17.5, 37.0, 26.0, 32.0]),
    (6.0, [47.0, 34.0, 35.0, 23.5, 47.0, 32.0, 41.0]),
    (10.0, [64.0, 43.0, 47.0, 32.0, 64.0, 44.0, 57.0]),
    (16.0, [85.0, 57.0, 63.0, 42.5, 85.0, 57.0, 76.0]),
];

/// CPC du câble twin & earth pour une section de phase donnée.
pub const TE_CPC: &[(f64, f64)] = &[
    (1.0, 1.0),
    (1.5, 1.0),
    (2.5, 1.5),
    (4.0, 1.5),
    (6.0, 2.5),
    (10.0, 4.0),
    (16.0, 6.0),
];

/// Zs maximal (Ω) Table 41.3, disjoncteurs BS EN 60898 / RCBO BS EN 61009,
/// avant correction de température. Ligne : (calibre A, [B, C, D]).
pub const MAX_ZS: &[(f64, [f64; 3])] = &[
    (6.0, [7.28, 3.64, 1.82]),
    (10.0, [4.37, 2.19, 1.09]),
    (16.0, [2.73, 1.37, 0.68]),
    (20.0, [2.19, 1.09, 0.55]),
    (25.0, [1.75, 0.87, 0.44]),
    (32.0, [1.37, 0.68, 0.34]),
    (40.0, [1.09, 0.55, 0.27]),
    (50.0, [0.87, 0.44, 0.22]),
    (63.0, [0.69, 0.35, 0.17]),
    (80.0, [0.55, 0.27, 0.14]),
    (100.0, [0.44, 0.22, 0.11]),
];

pub const CURVES: [&str; 3] = ["B", "C", "D"];

/// Plages usuelles par catégorie de circuit :
/// (catégorie, calibre min A, calibre max A, section min mm²).
pub const CATEGORY_LIMITS: &[(&str, f64, f64, f64)] = &[
    ("ring_final", 20.0, 32.0, 2.5),
    ("radial_socket", 16.0, 32.0, 2.5),
    ("lighting", 3.0, 16.0, 1.0),
    ("shower", 32.0, 50.0, 6.0),
    ("cooker", 20.0, 50.0, 4.0),
    ("immersion", 13.0, 20.0, 2.5),
    ("ev_charger", 32.0, 40.0, 6.0),
];
