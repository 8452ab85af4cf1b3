//! Inno Setup script template.
//!
//! Values containing Inno Setup constants joined with backslashes
//! (`{app}\App.exe`) are rendered in Rust and passed in whole, since a
//! backslash in front of `{{` escapes the mustache.

pub const ISS_TEMPLATE: &str = r#"[Setup]
AppName={{product_name}}
AppVersion={{version}}
AppPublisher={{publisher}}
AppPublisherURL={{publisher_url}}
DefaultDirName={{default_dir}}
DefaultGroupName={{product_name}}
OutputDir={{output_dir}}
OutputBaseFilename={{output_base_filename}}
Compression=lzma2
SolidCompression=yes
ArchitecturesInstallIn64BitMode=x64
{{icon_lines}}
WizardStyle=modern
PrivilegesRequired=admin

[Languages]
Name: "english"; MessagesFile: "compiler:Default.isl"

[Tasks]
Name: "desktopicon"; Description: "{cm:CreateDesktopIcon}"; GroupDescription: "{cm:AdditionalIcons}"

[Files]
Source: "{{files_source}}"; DestDir: "{app}"; Flags: ignoreversion recursesubdirs createallsubdirs

[Icons]
Name: "{{group_icon}}"; Filename: "{{app_exe}}"
Name: "{{desktop_icon}}"; Filename: "{{app_exe}}"; Tasks: desktopicon

[Run]
Filename: "{{app_exe}}"; Description: "{{launch_description}}"; Flags: nowait postinstall skipifsilent
"#;
