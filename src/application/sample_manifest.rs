/// The fixed demo manifest: a small React app with a few known-vulnerable
/// production dependencies and a typical TypeScript/Vite toolchain.
///
/// Kept as text so key order survives exactly as written.
pub const SAMPLE_MANIFEST: &str = r#"{
  "name": "example-react-app",
  "version": "1.0.0",
  "description": "A sample React application for testing dependency analysis",
  "dependencies": {
    "react": "^18.2.0",
    "react-dom": "^18.2.0",
    "axios": "^1.0.0",
    "lodash": "^4.17.21",
    "moment": "^2.29.4"
  },
  "devDependencies": {
    "typescript": "^5.0.0",
    "@types/react": "^18.0.0",
    "@types/react-dom": "^18.0.0",
    "vite": "^4.0.0"
  },
  "scripts": {
    "dev": "vite",
    "build": "vite build",
    "preview": "vite preview"
  }
}"#;

pub fn sample_manifest() -> &'static str {
    SAMPLE_MANIFEST
}
