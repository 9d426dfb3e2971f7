//! The icon sets shipped with the default asset tree

use super::ProviderDescriptor;

/// Known icon sets, each with a fixed id, display name and directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinProvider {
    Bootstrap,
    Feather,
    Gilbarbara,
    Heroicons,
    Iconoir,
    SimpleIcons,
    BrandLogos,
    Tabler,
}

/// (provider, id, display name, directory)
const BUILTIN_TABLE: &[(BuiltinProvider, &str, &str, &str)] = &[
    (BuiltinProvider::Bootstrap, "BOOTSTRAP", "Bootstrap", "bootstrap"),
    (BuiltinProvider::Feather, "FEATHER", "Feather", "feather"),
    (BuiltinProvider::Gilbarbara, "GILBARBARA", "Gilbarbara", "gilbarbara"),
    (BuiltinProvider::Heroicons, "HEROICONS", "Heroicons", "heroicons-24-solid"),
    (BuiltinProvider::Iconoir, "ICONOIR", "Iconoir", "iconoir"),
    (BuiltinProvider::SimpleIcons, "SIMPLE_ICONS", "Simple Icons", "simple-icons"),
    (BuiltinProvider::BrandLogos, "BRAND_LOGOS", "Brand Logos", "simple-svg-brand-logos"),
    (BuiltinProvider::Tabler, "TABLER", "Tabler", "tabler"),
];

impl BuiltinProvider {
    pub const ALL: [BuiltinProvider; 8] = [
        BuiltinProvider::Bootstrap,
        BuiltinProvider::Feather,
        BuiltinProvider::Gilbarbara,
        BuiltinProvider::Heroicons,
        BuiltinProvider::Iconoir,
        BuiltinProvider::SimpleIcons,
        BuiltinProvider::BrandLogos,
        BuiltinProvider::Tabler,
    ];

    // Table rows follow declaration order
    fn row(self) -> (&'static str, &'static str, &'static str) {
        let (_, id, display, path) = BUILTIN_TABLE[self as usize];
        (id, display, path)
    }

    pub fn id(self) -> &'static str {
        self.row().0
    }

    pub fn display_name(self) -> &'static str {
        self.row().1
    }

    pub fn base_path(self) -> &'static str {
        self.row().2
    }

    /// Look up a builtin set by its registry id
    pub fn from_id(id: &str) -> Option<Self> {
        BUILTIN_TABLE
            .iter()
            .find(|(_, builtin_id, ..)| *builtin_id == id)
            .map(|(provider, ..)| *provider)
    }

    pub fn descriptor(self) -> ProviderDescriptor {
        ProviderDescriptor::new(self.id(), self.display_name(), self.base_path())
    }

    /// Descriptors for every builtin set, in registration order
    pub fn all_descriptors() -> Vec<ProviderDescriptor> {
        Self::ALL.iter().map(|p| p.descriptor()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_has_a_row() {
        for provider in BuiltinProvider::ALL {
            assert_eq!(BUILTIN_TABLE[provider as usize].0, provider);
            assert_eq!(BuiltinProvider::from_id(provider.id()), Some(provider));
        }
    }

    #[test]
    fn test_descriptor() {
        let descriptor = BuiltinProvider::Heroicons.descriptor();
        assert_eq!(descriptor.id, "HEROICONS");
        assert_eq!(descriptor.base_path, "heroicons-24-solid");
        assert_eq!(BuiltinProvider::from_id("NOPE"), None);
        assert_eq!(BuiltinProvider::all_descriptors().len(), 8);
    }
}
