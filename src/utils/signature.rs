pub fn get_signature(version: &str) -> String {
    format!(
        r#"
   ___   _   ___  _  ___ _
  | _ ) /_\ |   \| |/ (_) |_         BADKit (the Blender Addon Development Kit)
  | _ \/ _ \| |) | ' <| |  _|
  |___/_/ \_\___/|_|\_\_|\__|        Build, check and launch Blender addon bundles.

                                     v{}
"#,
        version
    )
}
