mod artifact;

pub use artifact::MavenArtifact;

/// Well-known Maven repositories used by the Minecraft ecosystem.
pub const MOJANG_LIBRARIES: &str = "https://libraries.minecraft.net";
pub const MAVEN_CENTRAL: &str = "https://repo1.maven.org/maven2";
pub const FORGE_MAVEN: &str = "https://maven.minecraftforge.net";
/// Legacy Forge file host, still the canonical location of installer jars.
pub const FORGE_FILES_MAVEN: &str = "https://files.minecraftforge.net/maven";
pub const FABRIC_MAVEN: &str = "https://maven.fabricmc.net";
pub const QUILT_MAVEN: &str = "https://maven.quiltmc.org/repository/release";
pub const NEOFORGE_MAVEN: &str = "https://maven.neoforged.net/releases";
/// NeoForge host without the `releases` repository segment.
pub const NEOFORGE_MAVEN_ROOT: &str = "https://maven.neoforged.net";
pub const LITELOADER_MAVEN: &str = "https://repo.mumfrey.com/content/repositories/snapshots";
