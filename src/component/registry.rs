//! Known metadata types and their on-disk layout.
//!
//! Discovery and entry parsing both go through this table so type names are
//! canonical everywhere else.

/// The only type that can be enriched end to end.
pub const LIGHTNING_COMPONENT_BUNDLE: &str = "LightningComponentBundle";

/// How a type's components are laid out inside its directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One directory per component; the descriptor lives inside it.
    Bundle,
    /// One source file per component with a sibling descriptor.
    File { extension: &'static str },
    /// The descriptor is the only file.
    DescriptorOnly,
}

/// Registry entry for a metadata type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDefinition {
    pub name: &'static str,
    pub directory: &'static str,
    pub layout: Layout,
    pub descriptor_suffix: &'static str,
}

impl TypeDefinition {
    /// File name of the descriptor for a component of this type.
    pub fn descriptor_file_name(&self, component_name: &str) -> String {
        format!("{component_name}{}", self.descriptor_suffix)
    }
}

static TYPES: [TypeDefinition; 14] = [
    TypeDefinition {
        name: LIGHTNING_COMPONENT_BUNDLE,
        directory: "lwc",
        layout: Layout::Bundle,
        descriptor_suffix: ".js-meta.xml",
    },
    TypeDefinition {
        name: "AuraDefinitionBundle",
        directory: "aura",
        layout: Layout::Bundle,
        descriptor_suffix: ".cmp-meta.xml",
    },
    TypeDefinition {
        name: "ApexClass",
        directory: "classes",
        layout: Layout::File { extension: "cls" },
        descriptor_suffix: ".cls-meta.xml",
    },
    TypeDefinition {
        name: "ApexTrigger",
        directory: "triggers",
        layout: Layout::File {
            extension: "trigger",
        },
        descriptor_suffix: ".trigger-meta.xml",
    },
    TypeDefinition {
        name: "StaticResource",
        directory: "staticresources",
        layout: Layout::DescriptorOnly,
        descriptor_suffix: ".resource-meta.xml",
    },
    TypeDefinition {
        name: "ApexPage",
        directory: "pages",
        layout: Layout::File { extension: "page" },
        descriptor_suffix: ".page-meta.xml",
    },
    TypeDefinition {
        name: "ApexComponent",
        directory: "components",
        layout: Layout::File {
            extension: "component",
        },
        descriptor_suffix: ".component-meta.xml",
    },
    TypeDefinition {
        name: "CustomObject",
        directory: "objects",
        layout: Layout::Bundle,
        descriptor_suffix: ".object-meta.xml",
    },
    TypeDefinition {
        name: "Flow",
        directory: "flows",
        layout: Layout::DescriptorOnly,
        descriptor_suffix: ".flow-meta.xml",
    },
    TypeDefinition {
        name: "Layout",
        directory: "layouts",
        layout: Layout::DescriptorOnly,
        descriptor_suffix: ".layout-meta.xml",
    },
    TypeDefinition {
        name: "FlexiPage",
        directory: "flexipages",
        layout: Layout::DescriptorOnly,
        descriptor_suffix: ".flexipage-meta.xml",
    },
    TypeDefinition {
        name: "PermissionSet",
        directory: "permissionsets",
        layout: Layout::DescriptorOnly,
        descriptor_suffix: ".permissionset-meta.xml",
    },
    TypeDefinition {
        name: "CustomTab",
        directory: "tabs",
        layout: Layout::DescriptorOnly,
        descriptor_suffix: ".tab-meta.xml",
    },
    TypeDefinition {
        name: "LightningMessageChannel",
        directory: "messageChannels",
        layout: Layout::DescriptorOnly,
        descriptor_suffix: ".messageChannel-meta.xml",
    },
];

/// Look up a type by name, ignoring ASCII case.
pub fn by_name(name: &str) -> Option<&'static TypeDefinition> {
    TYPES
        .iter()
        .find(|definition| definition.name.eq_ignore_ascii_case(name))
}

/// Look up a type by the directory its components live in.
pub fn by_directory(directory: &str) -> Option<&'static TypeDefinition> {
    TYPES
        .iter()
        .find(|definition| definition.directory == directory)
}

/// Canonical spelling of a type name; unknown names pass through unchanged.
pub fn canonical_type_name(name: &str) -> String {
    by_name(name)
        .map(|definition| definition.name.to_string())
        .unwrap_or_else(|| name.to_string())
}
