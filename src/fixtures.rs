//! Fixtures

use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError},
    prices::Price,
    products::{Product, ProductError},
};

/// Errors raised while building fixture data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FixtureError {
    /// A fixture product failed validation.
    #[error(transparent)]
    Product(#[from] ProductError),

    /// The fixture catalogue failed validation.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Sample LevelUp Gaming catalogue used by the demo binary and the
/// integration tests. Prices are in whole Chilean pesos.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the fixture data itself is malformed.
pub fn sample_catalog() -> Result<Catalog, FixtureError> {
    let products = vec![
        Product::new(
            "MOU-001",
            "Ratón Inalámbrico Vortex",
            "Hyperion",
            "Sensor óptico de 16.000 DPI con seis botones programables",
            Price::new(24_990),
            25,
            4.6,
        )?,
        Product::new(
            "TEC-010",
            "Teclado Mecánico TKL",
            "Hyperion",
            "Switches rojos intercambiables en caliente, retroiluminación RGB",
            Price::new(49_990),
            18,
            4.8,
        )?,
        Product::new(
            "AUD-023",
            "Audífonos Circumaurales 7.1",
            "NoxAudio",
            "Sonido envolvente virtual con micrófono desmontable",
            Price::new(39_990),
            30,
            4.4,
        )?,
        Product::new(
            "PAD-004",
            "Alfombrilla XL Antideslizante",
            "NoxAudio",
            "Superficie de tela de 900x400 mm con bordes cosidos",
            Price::new(9_990),
            60,
            4.2,
        )?,
        Product::new(
            "CAM-007",
            "Cámara Web 1080p60",
            "Lumen",
            "Enfoque automático y corrección de luz escasa",
            Price::new(34_990),
            12,
            4.1,
        )?,
        Product::new(
            "MON-015",
            "Monitor Curvo 27\" 165 Hz",
            "Lumen",
            "Panel VA QHD con FreeSync Premium",
            Price::new(249_990),
            8,
            4.7,
        )?,
        Product::new(
            "SIL-002",
            "Silla Ergonómica Pro",
            "Trono",
            "Soporte lumbar ajustable y reposabrazos 4D",
            Price::new(189_990),
            5,
            4.5,
        )?,
        Product::new(
            "CON-019",
            "Control Inalámbrico Multiplataforma",
            "Hyperion",
            "Compatible con PC y móvil, batería de 40 horas",
            Price::new(29_990),
            40,
            4.3,
        )?,
    ];

    Ok(Catalog::from_products(products)?)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn sample_catalog_builds() -> TestResult {
        let catalog = sample_catalog()?;

        assert_eq!(catalog.len(), 8);
        assert!(catalog.get("MOU-001").is_some());

        Ok(())
    }

    #[test]
    fn sample_codes_are_unique() -> TestResult {
        let catalog = sample_catalog()?;
        let mut codes: Vec<&str> = catalog.iter().map(Product::code).collect();
        let before = codes.len();

        codes.sort_unstable();
        codes.dedup();

        assert_eq!(codes.len(), before);

        Ok(())
    }
}
