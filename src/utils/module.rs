// src/utils/module.rs

//! Module name normalization.

/// Standard library packages that users commonly type by their last path
/// element only.
const STD_ALIASES: &[(&str, &str)] = &[
    ("tar", "archive/tar"),
    ("zip", "archive/zip"),
    ("bzip2", "compress/bzip2"),
    ("flate", "compress/flate"),
    ("gzip", "compress/gzip"),
    ("lzw", "compress/lzw"),
    ("zlib", "compress/zlib"),
    ("heap", "container/heap"),
    ("list", "container/list"),
    ("ring", "container/ring"),
    ("aes", "crypto/aes"),
    ("cipher", "crypto/cipher"),
    ("des", "crypto/des"),
    ("dsa", "crypto/dsa"),
    ("ecdsa", "crypto/ecdsa"),
    ("ed25519", "crypto/ed25519"),
    ("elliptic", "crypto/elliptic"),
    ("hmac", "crypto/hmac"),
    ("md5", "crypto/md5"),
    ("rc4", "crypto/rc4"),
    ("rsa", "crypto/rsa"),
    ("sha1", "crypto/sha1"),
    ("sha256", "crypto/sha256"),
    ("sha512", "crypto/sha512"),
    ("subtle", "crypto/subtle"),
    ("tls", "crypto/tls"),
    ("x509", "crypto/x509"),
    ("pkix", "crypto/x509/pkix"),
    ("dwarf", "debug/dwarf"),
    ("elf", "debug/elf"),
    ("gosym", "debug/gosym"),
    ("macho", "debug/macho"),
    ("pe", "debug/pe"),
    ("plan9obj", "debug/plan9obj"),
    ("ascii85", "encoding/ascii85"),
    ("asn1", "encoding/asn1"),
    ("base32", "encoding/base32"),
    ("base64", "encoding/base64"),
    ("binary", "encoding/binary"),
    ("csv", "encoding/csv"),
    ("gob", "encoding/gob"),
    ("hex", "encoding/hex"),
    ("json", "encoding/json"),
    ("pem", "encoding/pem"),
    ("xml", "encoding/xml"),
    ("ast", "go/ast"),
    ("build", "go/build"),
    ("constraint", "go/build/constraint"),
    ("constant", "go/constant"),
    ("doc", "go/doc"),
    ("format", "go/format"),
    ("importer", "go/importer"),
    ("parser", "go/parser"),
    ("printer", "go/printer"),
    ("scanner", "go/scanner"),
    ("token", "go/token"),
    ("types", "go/types"),
    ("adler32", "hash/adler32"),
    ("crc32", "hash/crc32"),
    ("crc64", "hash/crc64"),
    ("fnv", "hash/fnv"),
    ("maphash", "hash/maphash"),
    ("color", "image/color"),
    ("draw", "image/draw"),
    ("gif", "image/gif"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("suffixarray", "index/suffixarray"),
    ("fs", "io/fs"),
    ("ioutil", "io/ioutil"),
    ("big", "math/big"),
    ("bits", "math/bits"),
    ("cmplx", "math/cmplx"),
    ("rand", "math/rand"),
    ("multipart", "mime/multipart"),
    ("quotedprintable", "mime/quotedprintable"),
    ("http", "net/http"),
    ("cgi", "net/http/cgi"),
    ("cookiejar", "net/http/cookiejar"),
    ("fcgi", "net/http/fcgi"),
    ("httptest", "net/http/httptest"),
    ("httptrace", "net/http/httptrace"),
    ("httputil", "net/http/httputil"),
    ("pprof", "net/http/pprof"),
    ("mail", "net/mail"),
    ("netip", "net/netip"),
    ("rpc", "net/rpc"),
    ("jsonrpc", "net/rpc/jsonrpc"),
    ("smtp", "net/smtp"),
    ("textproto", "net/textproto"),
    ("exec", "os/exec"),
    ("signal", "os/signal"),
    ("user", "os/user"),
    ("filepath", "path/filepath"),
    ("syntax", "regexp/syntax"),
    ("cgo", "runtime/cgo"),
    ("debug", "runtime/debug"),
    ("metrics", "runtime/metrics"),
    ("msan", "runtime/msan"),
    ("race", "runtime/race"),
    ("trace", "runtime/trace"),
    ("atomic", "sync/atomic"),
    ("js", "syscall/js"),
    ("fstest", "testing/fstest"),
    ("iotest", "testing/iotest"),
    ("quick", "testing/quick"),
    ("scanner", "text/scanner"),
    ("tabwriter", "text/tabwriter"),
    ("template", "text/template"),
    ("parse", "text/template/parse"),
    ("tzdata", "time/tzdata"),
    ("utf16", "unicode/utf16"),
    ("utf8", "unicode/utf8"),
];

/// Trim whitespace and surrounding slashes from a module path.
pub fn normalize(module: &str) -> &str {
    module.trim().trim_matches('/')
}

/// Full import path for a stdlib short name, if it is one.
///
/// The first entry wins when a short name is ambiguous (`scanner`).
pub fn std_alias(name: &str) -> Option<&'static str> {
    STD_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, path)| *path)
}

/// Normalize a module path and optionally expand a stdlib short name.
pub fn resolve(module: &str, expand_std_aliases: bool) -> String {
    let module = normalize(module);
    if expand_std_aliases {
        if let Some(path) = std_alias(module) {
            log::debug!("Expanding {module} to {path}");
            return path.to_string();
        }
    }
    module.to_string()
}
